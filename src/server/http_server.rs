//! Listener lifecycle for the demo server.
//!
//! `may_minihttp` owns the accept loop: it runs as one coroutine and spawns a
//! coroutine per connection, each holding a clone of the [`AppService`]. This
//! module only binds, reports readiness, and tears that accept coroutine down.
//!
//! [`AppService`]: crate::server::AppService

use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long [`ServerHandle::wait_ready`] polls before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_millis(250);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A service ready to be bound to a listening socket.
pub struct HttpServer<T>(pub T);

/// The running accept coroutine and the address it listens on.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the listener was bound to
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until a TCP connect to the listener succeeds, up to [`READY_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the listener never accepts.
    pub fn wait_ready(&self) -> io::Result<()> {
        self.wait_ready_within(READY_TIMEOUT)
    }

    /// Like [`wait_ready`](Self::wait_ready) with an explicit deadline.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if no connect succeeds before `timeout` elapses.
    pub fn wait_ready_within(&self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if TcpStream::connect(self.addr).is_ok() {
                debug!(addr = %self.addr, "Listener accepting connections");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("listener on {} not ready after {timeout:?}", self.addr),
                ));
            }
            thread::sleep(READY_POLL_INTERVAL);
        }
    }

    /// Cancel the accept coroutine and wait for it to unwind.
    ///
    /// Connections already being served finish on their own coroutines.
    pub fn stop(self) {
        // SAFETY: `may` marks cancellation unsafe because the coroutine unwinds at
        // its next yield point. The accept loop owns nothing but its listener,
        // which is closed by that unwind.
        #[allow(unsafe_code)]
        unsafe {
            self.handle.coroutine().cancel();
        }
        if self.handle.join().is_err() {
            debug!(addr = %self.addr, "Accept coroutine exited by cancellation");
        }
        info!(addr = %self.addr, "Server stopped");
    }

    /// Block until the accept coroutine exits, which in normal operation is never.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the accept coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind the first address `addr` resolves to and spawn the accept coroutine.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `addr` resolves to nothing, or the bind error.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
        })?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        info!(addr = %addr, "Listener bound");
        Ok(ServerHandle { addr, handle })
    }
}
