use crate::alert::sink::{AlertSettings, AlertSink};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

//queues alerts for a background worker that delivers them in FIFO order
pub struct AlertNotifier {
    sender: Option<Sender<String>>,
    worker: Option<JoinHandle<usize>>,
}

impl AlertNotifier {
    //starts the delivery worker; without settings every alert is suppressed
    pub fn spawn<S>(settings: Option<AlertSettings>, sink: S) -> Self
    where
        S: AlertSink + 'static,
    {
        let settings = match settings {
            Some(s) => s,
            None => {
                debug!("no alert settings, alerts will be suppressed");
                return AlertNotifier {
                    sender: None,
                    worker: None,
                };
            }
        };

        let (sender, receiver) = mpsc::channel::<String>();
        let mut sink = sink;

        let worker = thread::spawn(move || {
            let mut delivered = 0usize;
            //ends once every sender is dropped and the queue is drained
            for message in receiver {
                match sink.deliver(&settings, &message) {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!(error = %e, "alert delivery failed"),
                }
            }
            delivered
        });

        AlertNotifier {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    //enqueues an alert without waiting for delivery, returns whether it was queued
    pub fn raise(&self, message: impl Into<String>) -> bool {
        let message = message.into();
        match &self.sender {
            Some(sender) => {
                if sender.send(message).is_err() {
                    warn!("alert worker has stopped, alert dropped");
                    return false;
                }
                true
            }
            None => {
                warn!(%message, "alert suppressed, no delivery settings configured");
                false
            }
        }
    }

    //closes the queue and waits for queued alerts, returns how many were delivered
    pub fn shutdown(mut self) -> usize {
        self.close()
    }

    fn close(&mut self) -> usize {
        self.sender.take();
        match self.worker.take() {
            Some(worker) => worker.join().unwrap_or_else(|_| {
                warn!("alert worker panicked");
                0
            }),
            None => 0,
        }
    }
}

impl Drop for AlertNotifier {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::sink::AlertError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl AlertSink for RecordingSink {
        fn deliver(&mut self, _settings: &AlertSettings, message: &str) -> Result<(), AlertError> {
            if message.contains("fail") {
                return Err(AlertError::Transport("mailbox full".to_string()));
            }
            self.seen.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    fn settings() -> Option<AlertSettings> {
        Some(AlertSettings::new("smtp.example.com", "desk@example.com"))
    }

    #[test]
    fn delivers_in_fifo_order() {
        let sink = RecordingSink::default();
        let notifier = AlertNotifier::spawn(settings(), sink.clone());

        for i in 0..50 {
            assert!(notifier.raise(format!("alert {}", i)));
        }
        assert_eq!(notifier.shutdown(), 50);

        let seen = sink.seen.lock().unwrap();
        let expected: Vec<String> = (0..50).map(|i| format!("alert {}", i)).collect();
        assert_eq!(*seen, expected);
    }

    #[test]
    fn missing_settings_suppress_alerts() {
        let sink = RecordingSink::default();
        let notifier = AlertNotifier::spawn(None, sink.clone());

        assert!(!notifier.is_enabled());
        assert!(!notifier.raise("price crossed R1"));
        assert_eq!(notifier.shutdown(), 0);
        assert!(sink.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_delivery_does_not_stop_the_worker() {
        let sink = RecordingSink::default();
        let notifier = AlertNotifier::spawn(settings(), sink.clone());

        notifier.raise("first");
        notifier.raise("please fail");
        notifier.raise("third");
        assert_eq!(notifier.shutdown(), 2);
        assert_eq!(*sink.seen.lock().unwrap(), vec!["first", "third"]);
    }

    #[test]
    fn drop_drains_the_queue() {
        let sink = RecordingSink::default();
        {
            let notifier = AlertNotifier::spawn(settings(), sink.clone());
            notifier.raise("daily loss limit reached");
        }
        assert_eq!(sink.seen.lock().unwrap().len(), 1);
    }
}
