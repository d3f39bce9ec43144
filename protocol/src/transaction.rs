//! The transactional wrapper.

use crate::envelope::Opcode;
use crate::error::{SendError, SendErrorKind};
use crate::request::Request;
use crate::session::{self, Outcome, Session, ANY_TRANSACTION};
use crate::target::TargetResolver;
use crate::transport::Transport;
use codec::DecodeError;

/// Resets the session's transaction id on every exit path, including
/// unwinding out of the wrapped action.
struct ActiveTransaction<'s, T: Transport, R: TargetResolver> {
    session: &'s Session<T, R>,
}

impl<T: Transport, R: TargetResolver> Drop for ActiveTransaction<'_, T, R> {
    fn drop(&mut self) {
        self.session.set_transaction_id(ANY_TRANSACTION);
    }
}

impl<T: Transport, R: TargetResolver> Session<T, R> {
    /// Runs `action` inside a remote transaction.
    ///
    /// One transaction is in flight per session at most; the gate
    /// mutex is held for the full duration of the action, including
    /// the round-trips it performs. Begin captures the id the target
    /// assigns; every request sent inside the action carries it. A
    /// normal completion sends end-transaction; an error sends
    /// abort-transaction best-effort (its own failure is swallowed)
    /// and re-raises the original error.
    ///
    /// # Panics
    ///
    /// Panics if a transaction is already active on this session;
    /// nesting is a programming error, not a recoverable condition.
    pub fn with_transaction<F, O>(&self, action: F) -> Result<O, SendError>
    where
        F: FnOnce(&Self) -> Result<O, SendError>,
    {
        let _gate = session::lock(&self.transaction_gate);
        assert_eq!(
            self.transaction_id(),
            ANY_TRANSACTION,
            "transaction already active on this session"
        );

        let id = match self.send(&Request::new(Opcode::BEGIN_TRANSACTION))? {
            Outcome::Value(value) => value.to_i32().map_err(|err| SendError {
                opcode: Opcode::BEGIN_TRANSACTION,
                call: "begin transaction".to_string(),
                kind: err.into(),
            })?,
            other => {
                return Err(SendError {
                    opcode: Opcode::BEGIN_TRANSACTION,
                    call: "begin transaction".to_string(),
                    kind: SendErrorKind::Decode(DecodeError::wrong_type(
                        "transaction id",
                        &other,
                    )),
                })
            }
        };
        self.set_transaction_id(id);
        let active = ActiveTransaction { session: self };

        match action(self) {
            Ok(value) => {
                let ended = self.send(&Request::new(Opcode::END_TRANSACTION));
                drop(active);
                ended.map(|_| value)
            }
            Err(err) => {
                // Best-effort abort; the original error wins.
                let _ = self.send(&Request::new(Opcode::ABORT_TRANSACTION));
                drop(active);
                Err(err)
            }
        }
    }
}
