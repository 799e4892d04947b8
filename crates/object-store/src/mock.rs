//! # Mock Store & Testing Guide
//!
//! `MockClient<T>` hands out a real [`StoreClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test code that talks to the store without standing up the store itself,
//! and to inject failures that are hard to provoke with a real actor.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (scripted responses) | Real objects |
//! | **Use Case** | Logic *around* the client | The store or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Provider>::new();
//! mock.expect_get("provider-aws").return_ok(None);
//! mock.expect_create().return_err(StoreError::ActorClosed);
//!
//! let client = mock.client();
//! // ... exercise code using `client` ...
//! mock.verify();
//! ```
//!
//! For step-by-step control, [`create_mock_client`] returns the request
//! receiver directly, and the `expect_*` functions pop the next request so the
//! test can inspect it and answer it by hand.

use crate::message::{PatchOutcome, Response, StoreRequest};
use crate::{StoreClient, StoreError, StoreObject};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the scripted response to it.
enum Expectation<T: StoreObject> {
    Get {
        name: String,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Patch {
        name: String,
        response: Result<PatchOutcome<T>, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store client with expectation tracking.
///
/// Requests must arrive in the order the expectations were declared. A request
/// that does not match the next expectation (wrong variant or wrong name)
/// panics the background task, which surfaces in the test as
/// `StoreError::ActorDropped`.
pub struct MockClient<T: StoreObject> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreObject> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { name, respond_to },
                        Some(Expectation::Get {
                            name: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(name, expected, "Get for unexpected name");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Patch {
                            name, respond_to, ..
                        },
                        Some(Expectation::Patch {
                            name: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(name, expected, "Patch for unexpected name");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `name`.
    pub fn expect_get(&mut self, name: impl Into<String>) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            name: name.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `patch` of `name`.
    pub fn expect_patch(&mut self, name: impl Into<String>) -> PatchExpectationBuilder<T> {
        PatchExpectationBuilder {
            name: name.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: StoreObject> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: StoreObject> {
    name: String,
    expectations: Expectations<T>,
}

impl<T: StoreObject> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, StoreError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            name: self.name,
            response,
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: StoreObject> {
    expectations: Expectations<T>,
}

impl<T: StoreObject> ListExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response: Ok(items) });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: StoreObject> {
    expectations: Expectations<T>,
}

impl<T: StoreObject> CreateExpectationBuilder<T> {
    pub fn return_ok(self, object: T) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Ok(object) });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Err(error) });
    }
}

/// Builder for `patch` expectations.
pub struct PatchExpectationBuilder<T: StoreObject> {
    name: String,
    expectations: Expectations<T>,
}

impl<T: StoreObject> PatchExpectationBuilder<T> {
    pub fn return_ok(self, object: T, changed: bool) {
        self.push(Ok(PatchOutcome { object, changed }));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<PatchOutcome<T>, StoreError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Patch {
            name: self.name,
            response,
        });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: StoreObject>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Pops the next request if it is a `Get`.
pub async fn expect_get<T: StoreObject>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(String, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a `Create`.
pub async fn expect_create<T: StoreObject>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { object, respond_to }) => Some((object, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a `Patch`.
pub async fn expect_patch<T: StoreObject>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(String, T::Patch, Response<PatchOutcome<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Patch {
            name,
            patch,
            respond_to,
        }) => Some((name, patch, respond_to)),
        _ => None,
    }
}
