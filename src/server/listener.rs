// Listener setup module
// Binds the serving socket with address reuse enabled

use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Accept queue depth for the serving socket.
const BACKLOG: i32 = 128;

/// Bind a non-blocking listener with `SO_REUSEPORT` and `SO_REUSEADDR` set.
///
/// Address reuse lets a replacement process bind the same address:port
/// before the old one exits, and skips the `TIME_WAIT` delay on restart.
pub fn create_reusable_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    // Tokio requires the socket in non-blocking mode
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    TcpListener::from_std(socket.into())
}
