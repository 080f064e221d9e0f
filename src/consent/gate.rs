//! Disclaimer gate: decides between the disclaimer modal and the main app.
//!
//! # Transitions
//! ```text
//! open:   stored agreed == true        → MainApp
//!         otherwise                    → Modal { default = stored dont_show_again }
//! agree:  save {true, dont_show_again} → MainApp
//! cancel: save {false, false}          → close handler present: Closed
//!                                      → otherwise: Modal { default = false }
//! ```

use std::fmt;

use crate::consent::state::{ConsentError, DisclaimerState};
use crate::consent::store::ConsentStore;
use crate::logging::Logger;
use crate::serialize::Value;

/// What should be on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Modal { default_dont_show_again: bool },
    MainApp,
}

/// Result of declining the disclaimer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The close handler ran.
    Closed,
    /// No close handler; the modal is shown again.
    Reset,
}

type CloseHandler = Box<dyn FnMut() + Send>;

pub struct ConsentGate<S> {
    store: S,
    view: GateView,
    on_close: Option<CloseHandler>,
    logger: Logger,
}

impl<S: ConsentStore> ConsentGate<S> {
    /// Load the stored state and pick the initial view. Transitions are
    /// reported through `logger`.
    pub async fn open(store: S, logger: Logger) -> Result<Self, ConsentError> {
        let stored = store.load().await?;
        let view = match stored {
            Some(state) if state.agreed => GateView::MainApp,
            other => GateView::Modal {
                default_dont_show_again: other.is_some_and(|state| state.dont_show_again),
            },
        };
        logger.debug("Consent gate opened", Some(&Value::capture(&stored)), &[]);

        Ok(Self {
            store,
            view,
            on_close: None,
            logger,
        })
    }

    /// Handler run when the user cancels.
    pub fn with_close_handler(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    pub fn view(&self) -> GateView {
        self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn agree(&mut self, dont_show_again: bool) -> Result<GateView, ConsentError> {
        let state = DisclaimerState::agreed(dont_show_again);
        self.store.save(state).await?;
        self.view = GateView::MainApp;
        self.logger.info("Disclaimer accepted", Some(&Value::capture(&state)), &[]);
        Ok(self.view)
    }

    pub async fn cancel(&mut self) -> Result<CancelOutcome, ConsentError> {
        self.store.save(DisclaimerState::declined()).await?;
        self.logger.info("Disclaimer declined", None, &[]);

        if let Some(close) = self.on_close.as_mut() {
            close();
            return Ok(CancelOutcome::Closed);
        }
        self.view = GateView::Modal {
            default_dont_show_again: false,
        };
        Ok(CancelOutcome::Reset)
    }
}

impl<S: fmt::Debug> fmt::Debug for ConsentGate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsentGate")
            .field("store", &self.store)
            .field("view", &self.view)
            .field("has_close_handler", &self.on_close.is_some())
            .finish()
    }
}
