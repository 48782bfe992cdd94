//! Integration-test harness pairing an app server with a browser driver.
//!
//! Neither side is implemented here: test suites plug in their own server
//! and driver through the two traits.

use anyhow::Result;

/// Serves an application under test.
pub trait AppServer<A> {
    /// Start serving `app`.
    fn start(&mut self, app: A) -> Result<()>;

    /// Base URL of the running server.
    fn url(&self) -> &str;
}

/// Drives a browser against a server.
pub trait BrowserDriver {
    /// Point the driver at `url` and wait for the page to load.
    fn set_server_url(&mut self, url: &str) -> Result<()>;
}

/// A browser driver bound to an app server.
pub struct Composite<S, B> {
    pub server: S,
    pub browser: B,
}

impl<S, B: BrowserDriver> Composite<S, B> {
    pub fn new(server: S, browser: B) -> Self {
        Self { server, browser }
    }

    /// Start the server with `app`, then aim the browser at it.
    pub fn start_server<A>(&mut self, app: A) -> Result<()>
    where
        S: AppServer<A>,
    {
        self.server.start(app)?;
        self.browser.set_server_url(self.server.url())
    }
}
