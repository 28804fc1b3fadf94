//! A mock GitHub API and the runtime that drives it, owned by one scenario.

use std::future::Future;
use std::io;
use std::rc::Rc;

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

struct Running {
    // Dropped before the runtime it was started on.
    server: MockServer,
    runtime: Runtime,
}

/// Handle to a started mock API, cheap to clone out of a scenario `Slot`.
#[derive(Clone)]
pub(crate) struct MockGitHub(Rc<Running>);

impl MockGitHub {
    /// Starts a runtime and a mock server on it.
    pub(crate) fn start() -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self(Rc::new(Running { server, runtime })))
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.runtime.block_on(future)
    }

    pub(crate) fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.0.server));
    }

    /// Number of requests served so far.
    pub(crate) fn request_count(&self) -> usize {
        self.block_on(self.0.server.received_requests())
            .map_or(0, |requests| requests.len())
    }

    /// Replaces the `SERVER` placeholder in a repository URL with this
    /// server's address.
    pub(crate) fn repository_url(&self, template: &str) -> String {
        let server_url = self.0.server.uri();
        let cleaned = template.trim_matches('"');
        if cleaned.contains("://SERVER") {
            cleaned
                .replace("https://SERVER", &server_url)
                .replace("http://SERVER", &server_url)
        } else {
            cleaned.replace("SERVER", &server_url)
        }
    }
}
