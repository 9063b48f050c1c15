use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ssh2::Session;

use sshdiff_core::{ChannelError, RemoteChannel};

use crate::error::SessionError;

pub const DEFAULT_PORT: u16 = 22;

/// Where and as whom to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub private_key: PathBuf,
    pub public_key: Option<PathBuf>,
    pub passphrase: Option<String>,
    /// Applied to connect and every blocking libssh2 call. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl SshTarget {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// An authenticated session. Commands run strictly one at a time.
pub struct SshChannel {
    session: Session,
    addr: String,
    closed: bool,
}

impl SshChannel {
    /// Connect, handshake and authenticate with the target's key pair.
    pub fn connect(target: &SshTarget) -> Result<Self, SessionError> {
        let addr = target.address();
        let tcp = open_tcp(&addr, target.timeout).map_err(|source| SessionError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let mut session = Session::new()?;
        if let Some(timeout) = target.timeout {
            session.set_timeout(timeout.as_millis().min(u32::MAX as u128) as u32);
        }
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|source| SessionError::Handshake {
                addr: addr.clone(),
                source,
            })?;

        let auth = session.userauth_pubkey_file(
            &target.username,
            target.public_key.as_deref(),
            &target.private_key,
            target.passphrase.as_deref(),
        );
        if let Err(err) = auth {
            return Err(SessionError::Auth {
                user: target.username.clone(),
                private_key: target.private_key.clone(),
                reason: err.to_string(),
            });
        }
        if !session.authenticated() {
            return Err(SessionError::Auth {
                user: target.username.clone(),
                private_key: target.private_key.clone(),
                reason: "server did not accept the key".to_string(),
            });
        }

        tracing::info!("connected to {addr} as {}", target.username);
        Ok(Self {
            session,
            addr,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<(), ChannelError> {
        if self.closed {
            Err(ChannelError::Closed)
        } else {
            Ok(())
        }
    }
}

impl RemoteChannel for SshChannel {
    fn run(&mut self, command: &str) -> Result<String, ChannelError> {
        self.ensure_open()?;
        let exec_err = |err: ssh2::Error| ChannelError::Exec {
            command: command.to_owned(),
            reason: err.to_string(),
        };

        let mut channel = self.session.channel_session().map_err(exec_err)?;
        channel.exec(command).map_err(exec_err)?;
        let mut raw = Vec::new();
        channel
            .read_to_end(&mut raw)
            .map_err(|err| ChannelError::Exec {
                command: command.to_owned(),
                reason: err.to_string(),
            })?;
        channel.wait_close().map_err(exec_err)?;

        tracing::trace!("{}: `{command}` -> {} bytes", self.addr, raw.len());
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn fetch(&mut self, remote_path: &str, sink: &mut dyn Write) -> Result<u64, ChannelError> {
        self.ensure_open()?;
        let transfer_err = |err: ssh2::Error| ChannelError::Transfer {
            path: remote_path.to_owned(),
            reason: err.to_string(),
        };

        let (mut channel, stat) = self
            .session
            .scp_recv(Path::new(remote_path))
            .map_err(transfer_err)?;
        let copied = io::copy(&mut (&mut channel).take(stat.size()), sink)?;

        channel.send_eof().map_err(transfer_err)?;
        channel.wait_eof().map_err(transfer_err)?;
        channel.close().map_err(transfer_err)?;
        channel.wait_close().map_err(transfer_err)?;

        if copied != stat.size() {
            return Err(ChannelError::Transfer {
                path: remote_path.to_owned(),
                reason: format!("short read: {copied} of {} bytes", stat.size()),
            });
        }
        Ok(copied)
    }

    fn logout(&mut self) -> Result<(), ChannelError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.session
            .disconnect(None, "logout", None)
            .map_err(|err| ChannelError::Exec {
                command: "logout".to_owned(),
                reason: err.to_string(),
            })?;
        tracing::info!("disconnected from {}", self.addr);
        Ok(())
    }
}

fn open_tcp(addr: &str, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let Some(timeout) = timeout else {
        return TcpStream::connect(addr);
    };

    let mut last_err = None;
    for candidate in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("{addr} did not resolve"))
    }))
}
