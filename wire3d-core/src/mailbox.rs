/// Single-slot, newest-wins mailbox between the input thread and the
/// update loop.
use std::sync::{Mutex, MutexGuard};

use crate::command::Command;
use crate::error::MailboxError;

/// Mailbox carrying operator commands
pub type CommandMailbox = Mailbox<Command>;

/// At most one pending value. Publishing overwrites anything the consumer
/// has not taken yet; consuming reads and clears the slot in one step.
///
/// The lock is held only for the swap itself, never across I/O.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    /// Store `value`, returning the unconsumed value it displaced.
    pub fn publish(&self, value: T) -> Result<Option<T>, MailboxError> {
        Ok(self.lock()?.replace(value))
    }

    /// Take the pending value, if any, leaving the slot empty.
    pub fn try_consume(&self) -> Result<Option<T>, MailboxError> {
        Ok(self.lock()?.take())
    }

    pub fn is_pending(&self) -> Result<bool, MailboxError> {
        Ok(self.lock()?.is_some())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<T>>, MailboxError> {
        self.slot.lock().map_err(|_| MailboxError::Poisoned)
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_mailbox() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        assert_eq!(mailbox.try_consume(), Ok(None));
        assert_eq!(mailbox.is_pending(), Ok(false));
    }

    #[test]
    fn test_newest_wins() {
        let mailbox = CommandMailbox::new();
        let first = Command::rotate("cube", 1.0, 0.0, 0.0);
        let second = Command::translate("cube", 0.0, 2.0, 0.0);

        assert_eq!(mailbox.publish(first.clone()), Ok(None));
        assert_eq!(mailbox.publish(second.clone()), Ok(Some(first)));
        assert_eq!(mailbox.is_pending(), Ok(true));
        assert_eq!(mailbox.try_consume(), Ok(Some(second)));
        assert_eq!(mailbox.try_consume(), Ok(None));
    }

    #[test]
    fn test_consumed_exactly_once_across_threads() {
        let mailbox = Arc::new(Mailbox::<u32>::new());
        let producer = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                for i in 0..1000 {
                    mailbox.publish(i).unwrap();
                }
            })
        };

        let mut seen = Vec::new();
        while !producer.is_finished() {
            if let Some(value) = mailbox.try_consume().unwrap() {
                seen.push(value);
            }
        }
        producer.join().unwrap();
        if let Some(value) = mailbox.try_consume().unwrap() {
            seen.push(value);
        }

        // Values arrive in publish order, never twice, and the last one
        // always survives.
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&999));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let mailbox = Arc::new(Mailbox::<u32>::new());
        let poisoner = Arc::clone(&mailbox);
        let _ = thread::spawn(move || {
            let _guard = poisoner.slot.lock().unwrap();
            panic!("poison the mailbox");
        })
        .join();

        assert_eq!(mailbox.publish(1), Err(MailboxError::Poisoned));
        assert_eq!(mailbox.try_consume(), Err(MailboxError::Poisoned));
    }
}
