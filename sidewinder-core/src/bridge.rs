//! SampleBridge: forwards decoded samples from a source to a sink.

use crate::input::{SampleSource, SourceError};
use crate::output::{SampleSink, SinkError};

/// Forwards joystick samples from a [`SampleSource`] to a [`SampleSink`].
///
/// # Error Handling
///
/// A source error is returned without touching the sink. In particular a
/// stale sample is never forwarded, and nothing is substituted for it.
pub struct SampleBridge<I, O> {
    input: I,
    output: O,
    forwarded: u32,
}

impl<I: SampleSource, O: SampleSink> SampleBridge<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            forwarded: 0,
        }
    }

    /// Receive one sample and forward it.
    pub async fn process_one(&mut self) -> Result<(), BridgeError> {
        let sample = self.input.receive().await.map_err(BridgeError::Source)?;
        self.output
            .send(&sample)
            .await
            .map_err(BridgeError::Sink)?;
        self.forwarded = self.forwarded.wrapping_add(1);
        Ok(())
    }

    /// Samples successfully handed to the sink (wrapping).
    pub fn forwarded(&self) -> u32 {
        self.forwarded
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    Source(SourceError),
    Sink(SinkError),
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use sidewinder_proto::{Buttons, JoystickSample};
    use std::sync::{Arc, Mutex};
    use std::vec;
    use std::vec::Vec;

    struct MockSource {
        samples: Vec<Result<JoystickSample, SourceError>>,
        index: usize,
    }

    impl MockSource {
        fn new(samples: Vec<Result<JoystickSample, SourceError>>) -> Self {
            Self { samples, index: 0 }
        }
    }

    impl SampleSource for MockSource {
        fn receive(&mut self) -> impl Future<Output = Result<JoystickSample, SourceError>> {
            let result = match self.samples.get(self.index) {
                Some(r) => {
                    self.index += 1;
                    *r
                }
                None => Err(SourceError::Io),
            };
            core::future::ready(result)
        }

        fn is_valid(&self) -> bool {
            matches!(self.samples.get(self.index), Some(Ok(_)))
        }
    }

    struct MockSink {
        sent: Arc<Mutex<Vec<JoystickSample>>>,
        fail: Option<SinkError>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: None,
            }
        }
    }

    impl SampleSink for MockSink {
        fn send(&mut self, sample: &JoystickSample) -> impl Future<Output = Result<(), SinkError>> {
            let result = match self.fail {
                Some(err) => Err(err),
                None => {
                    self.sent.lock().unwrap().push(*sample);
                    Ok(())
                }
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            self.fail.is_none()
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: f is not moved after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => panic!("mock future returned Pending"),
        }
    }

    fn sample() -> JoystickSample {
        JoystickSample {
            x: 512,
            y: 300,
            m: 64,
            r: 20,
            head: 4,
            ..JoystickSample::empty()
        }
        .with_buttons(Buttons::FIRE | Buttons::SHIFT)
    }

    #[test]
    fn test_bridge_forwards_sample() {
        let output = MockSink::new();
        let sent = output.sent.clone();
        let mut bridge = SampleBridge::new(MockSource::new(vec![Ok(sample())]), output);

        assert!(bridge.input().is_valid());
        assert_eq!(block_on(bridge.process_one()), Ok(()));
        assert_eq!(*sent.lock().unwrap(), [sample()]);
        assert_eq!(bridge.forwarded(), 1);
    }

    #[test]
    fn test_stale_sample_is_not_forwarded() {
        let output = MockSink::new();
        let sent = output.sent.clone();
        let mut bridge = SampleBridge::new(
            MockSource::new(vec![Err(SourceError::Stale), Ok(sample())]),
            output,
        );

        assert_eq!(
            block_on(bridge.process_one()),
            Err(BridgeError::Source(SourceError::Stale))
        );
        assert!(sent.lock().unwrap().is_empty());

        assert_eq!(block_on(bridge.process_one()), Ok(()));
        assert_eq!(sent.lock().unwrap().len(), 1);
        assert_eq!(bridge.forwarded(), 1);
    }

    #[test]
    fn test_sink_error_is_reported() {
        let mut output = MockSink::new();
        output.fail = Some(SinkError::NotReady);
        let mut bridge = SampleBridge::new(MockSource::new(vec![Ok(sample())]), output);

        assert!(!bridge.output().is_ready());
        assert_eq!(
            block_on(bridge.process_one()),
            Err(BridgeError::Sink(SinkError::NotReady))
        );
        assert_eq!(bridge.forwarded(), 0);

        let (input, _) = bridge.into_parts();
        assert_eq!(input.index, 1);
    }
}
