//! Log output of the submit flow

use folio_forms::{FormField, FormValidator, FormValues, SubmitError};
use rstest::rstest;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures `[LEVEL] message` lines
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.logs
			.lock()
			.unwrap()
			.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

#[rstest]
#[tokio::test]
async fn test_failed_submission_is_logged_as_error() {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let _guard = tracing_subscriber::registry()
		.with(LogCapture { logs: logs.clone() })
		.set_default();
	let mut form = FormValidator::new(
		[("name", FormField::new("Ada").required())],
		|_values: FormValues| async { Err::<(), SubmitError>(SubmitError::rejected("Server down")) },
	);

	// Act
	let submitted = form.handle_submit().await;

	// Assert
	assert!(!submitted);
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.starts_with("[ERROR]") && log.contains("Form submission error")),
		"Expected error log for failed submission, but got: {:?}",
		*captured
	);
}

#[rstest]
#[tokio::test]
async fn test_unknown_field_in_reducer_is_warned() {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let _guard = tracing_subscriber::registry()
		.with(LogCapture { logs: logs.clone() })
		.set_default();
	let mut form = FormValidator::new(
		[("name", FormField::new(""))],
		|_values: FormValues| async { Ok::<(), SubmitError>(()) },
	);

	// Act
	form.dispatch(folio_forms::FormAction::SetValue {
		name: "nickname".to_string(),
		value: "Ada".to_string(),
	});

	// Assert
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.starts_with("[WARN]") && log.contains("unknown field")),
		"Expected warning for unknown field, but got: {:?}",
		*captured
	);
	assert!(!form.state().contains("nickname"));
}
