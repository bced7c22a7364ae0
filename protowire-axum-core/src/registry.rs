//! Erased message registry for dynamic-dispatch boundaries.
//!
//! Statically typed callers use [`encode`](crate::encode) and
//! [`decode`](crate::decode) and never need this module. Where a handler layer
//! only holds `&dyn Any`, a [`MessageRegistry`] maps the value's concrete type
//! back to its message implementation and reports
//! [`CodecError::TypeContract`] for anything that was never registered.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use http::HeaderMap;

use crate::envelope::Encoded;
use crate::error::Operation;
use crate::message::verify_name;
use crate::{CodecError, FormatKind, Message};

/// Object-safe view of a concrete [`Message`] type.
trait ErasedMessage: Send + Sync + 'static {
    fn message_name(&self) -> String;

    fn encode(&self, kind: FormatKind, value: &dyn Any) -> Option<Result<Encoded, CodecError>>;

    fn decode(
        &self,
        kind: FormatKind,
        payload: &[u8],
        target: &mut dyn Any,
    ) -> Option<Result<(), CodecError>>;
}

struct Typed<M>(PhantomData<fn() -> M>);

impl<M: Message> ErasedMessage for Typed<M> {
    fn message_name(&self) -> String {
        M::message_name()
    }

    fn encode(&self, kind: FormatKind, value: &dyn Any) -> Option<Result<Encoded, CodecError>> {
        let message = value.downcast_ref::<M>()?;
        Some(kind.serialize(message).and_then(|payload| {
            Encoded::new(kind.name(), kind.content_type(), &M::message_name(), payload)
        }))
    }

    fn decode(
        &self,
        kind: FormatKind,
        payload: &[u8],
        target: &mut dyn Any,
    ) -> Option<Result<(), CodecError>> {
        let target = target.downcast_mut::<M>()?;
        Some(kind.deserialize::<M>(payload).map(|message| *target = message))
    }
}

/// A registered message type.
#[derive(Clone)]
struct BoxedMessage(Arc<dyn ErasedMessage>);

impl std::fmt::Debug for BoxedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxedMessage")
            .field(&self.0.message_name())
            .finish()
    }
}

/// Set of message types accepted at a dynamic boundary.
///
/// # Example
///
/// ```ignore
/// let registry = MessageRegistry::new()
///     .register::<Greeting>()
///     .register::<Farewell>();
///
/// let value: Box<dyn Any> = Box::new(Greeting::default());
/// let encoded = registry.encode_any(FormatKind::Binary, value.as_ref())?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct MessageRegistry {
    by_type: HashMap<TypeId, BoxedMessage>,
}

impl MessageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register message type `M`.
    pub fn register<M: Message>(mut self) -> Self {
        self.insert::<M>();
        self
    }

    /// Register message type `M` in place.
    pub fn insert<M: Message>(&mut self) {
        self.by_type.insert(
            TypeId::of::<M>(),
            BoxedMessage(Arc::new(Typed::<M>(PhantomData))),
        );
    }

    /// Whether the concrete type of `value` is registered.
    pub fn contains(&self, value: &dyn Any) -> bool {
        self.by_type.contains_key(&value.type_id())
    }

    /// Whether a message with this fully-qualified name is registered.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_type.values().any(|m| m.0.message_name() == name)
    }

    /// Names of all registered messages, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.by_type.values().map(|m| m.0.message_name()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Message name of the concrete type of `value`, if registered.
    pub fn message_name_of(&self, value: &dyn Any) -> Option<String> {
        self.by_type
            .get(&value.type_id())
            .map(|m| m.0.message_name())
    }

    /// Encode a type-erased value.
    ///
    /// Fails with [`CodecError::TypeContract`] before serializing anything when
    /// the value's type is not registered.
    pub fn encode_any(&self, kind: FormatKind, value: &dyn Any) -> Result<Encoded, CodecError> {
        let contract = || CodecError::TypeContract {
            format: kind.name(),
            op: Operation::Encode,
            type_id: value.type_id(),
        };
        let entry = self.by_type.get(&value.type_id()).ok_or_else(contract)?;
        entry.0.encode(kind, value).ok_or_else(contract)?
    }

    /// Decode into a type-erased target.
    ///
    /// Checks, in order: the target type is registered, the announced message
    /// name matches, the payload parses. `target` is only written on success.
    pub fn decode_any(
        &self,
        kind: FormatKind,
        headers: &HeaderMap,
        payload: &[u8],
        target: &mut dyn Any,
    ) -> Result<(), CodecError> {
        let type_id = (*target).type_id();
        let contract = || CodecError::TypeContract {
            format: kind.name(),
            op: Operation::Decode,
            type_id,
        };
        let entry = self.by_type.get(&type_id).ok_or_else(contract)?;
        verify_name(kind.name(), headers, &entry.0.message_name())?;
        entry.0.decode(kind, payload, target).ok_or_else(contract)?
    }
}
