//! Change notifications and the veto protocol.
//!
//! Every store mutation asks its listener first (`before_change`) and only
//! writes when the answer is [`Proceed`]. The entity forwards both the request
//! and the completed change to its own subscribers.

use std::cell::{
    Cell,
    RefCell,
};
use std::rc::Rc;

use super::identity::EntityIdentity;
use super::language::{
    LanguageListener,
    ResourceLanguage,
};
use crate::culture::Culture;

/// Permission to go ahead with a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Proceed;

/// Refusal of a change, optionally explaining why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Veto {
    reason: Option<String>,
}

impl Veto {
    #[must_use]
    pub const fn new() -> Self {
        Self { reason: None }
    }

    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self { reason: Some(reason.into()) }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Result of a single store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum EditOutcome {
    /// The store was written and `changed` was raised.
    Applied,
    /// Nothing to do (absent key, same value). No notification was raised.
    Unchanged,
    /// A `changing` handler refused the write; the store is untouched.
    Vetoed(Veto),
}

impl EditOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn is_vetoed(&self) -> bool {
        matches!(self, Self::Vetoed(_))
    }
}

/// Raised before a language of `entity` is modified.
#[derive(Debug, Clone, Copy)]
pub struct ChangingEvent<'a> {
    pub entity: &'a EntityIdentity,
    pub culture: &'a Culture,
}

/// Raised after a language of `entity` was modified.
#[derive(Debug, Clone, Copy)]
pub struct ChangedEvent<'a> {
    pub entity: &'a EntityIdentity,
    pub language: &'a ResourceLanguage,
}

/// Handler of [`ChangingEvent`]; returning a [`Veto`] cancels the change.
pub type ChangingHandler = Rc<dyn Fn(&ChangingEvent<'_>) -> Result<Proceed, Veto>>;

pub type ChangedHandler = Rc<dyn Fn(&ChangedEvent<'_>)>;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered subscriber list.
///
/// Dispatch works on a snapshot, so handlers may subscribe or unsubscribe
/// while an event is being delivered; the change applies to the next event.
pub(crate) struct Subscribers<H> {
    /// Next id to hand out
    next_id: Cell<u64>,
    /// Handlers in subscription order
    handlers: RefCell<Vec<(SubscriptionId, H)>>,
}

impl<H: Clone> Subscribers<H> {
    pub(crate) const fn new() -> Self {
        Self { next_id: Cell::new(0), handlers: RefCell::new(Vec::new()) }
    }

    pub(crate) fn subscribe(&self, handler: H) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(subscribed, _)| *subscribed != id);
        handlers.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    fn snapshot(&self) -> Vec<H> {
        self.handlers.borrow().iter().map(|(_, handler)| handler.clone()).collect()
    }
}

/// The entity's Changing / Changed subscribers, attached as listener to every
/// language store of the entity.
pub(crate) struct EntityEvents {
    /// Identity passed to handlers as the event source
    entity: Rc<EntityIdentity>,
    pub(crate) changing: Subscribers<ChangingHandler>,
    pub(crate) changed: Subscribers<ChangedHandler>,
}

impl EntityEvents {
    pub(crate) const fn new(entity: Rc<EntityIdentity>) -> Self {
        Self { entity, changing: Subscribers::new(), changed: Subscribers::new() }
    }

    /// Asks every Changing handler in order; the first veto wins and stops dispatch.
    pub(crate) fn raise_changing(&self, culture: &Culture) -> Result<Proceed, Veto> {
        let event = ChangingEvent { entity: &self.entity, culture };
        tracing::trace!(
            entity = %self.entity,
            culture = %culture,
            subscribers = self.changing.len(),
            "Raising changing"
        );

        for handler in self.changing.snapshot() {
            if let Err(veto) = handler(&event) {
                tracing::debug!(entity = %self.entity, culture = %culture, ?veto, "Change vetoed");
                return Err(veto);
            }
        }
        Ok(Proceed)
    }

    pub(crate) fn raise_changed(&self, language: &ResourceLanguage) {
        let event = ChangedEvent { entity: &self.entity, language };
        tracing::trace!(entity = %self.entity, culture = %language.culture(), "Raising changed");

        for handler in self.changed.snapshot() {
            handler(&event);
        }
    }
}

impl LanguageListener for EntityEvents {
    fn before_change(&self, language: &ResourceLanguage) -> Result<Proceed, Veto> {
        self.raise_changing(language.culture())
    }

    fn after_change(&self, language: &ResourceLanguage) {
        self.raise_changed(language);
    }
}
