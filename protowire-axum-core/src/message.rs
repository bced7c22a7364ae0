//! Message identity contract.
//!
//! Every message type exposes a stable, fully-qualified type name. Encoders
//! publish it in the [`MESSAGE_NAME_HEADER`] header and decoders compare it
//! against the name of the type they are decoding into.

use http::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CodecError;

/// Header carrying the producer's message type name.
///
/// Producers write it as `X-Protobuf-Message-Name`; header names are
/// case-insensitive on the wire.
pub const MESSAGE_NAME_HEADER: &str = "x-protobuf-message-name";

/// A self-describing message that both wire formats can handle.
///
/// Implemented automatically for every prost message that also carries a
/// [`prost::Name`] and serde impls for the JSON mapping (as produced by
/// `prost-build` together with `pbjson-build`).
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
/// pub struct Greeting {
///     #[prost(string, tag = "1")]
///     pub name: String,
/// }
///
/// impl prost::Name for Greeting {
///     const NAME: &'static str = "Greeting";
///     const PACKAGE: &'static str = "acme.v1";
/// }
///
/// assert_eq!(Greeting::message_name(), "acme.v1.Greeting");
/// ```
pub trait Message:
    prost::Message + prost::Name + Serialize + DeserializeOwned + Default + Send + Sync + 'static
{
    /// The fully-qualified type name used as the message identity.
    fn message_name() -> String;
}

impl<T> Message for T
where
    T: prost::Message + prost::Name + Serialize + DeserializeOwned + Default + Send + Sync + 'static,
{
    fn message_name() -> String {
        T::full_name()
    }
}

/// Read the message name announced by the producer.
///
/// Returns `None` when the header is missing or empty. Values that are not
/// valid header text are rendered lossily so they still fail verification.
pub fn announced_name(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(MESSAGE_NAME_HEADER)?;
    if value.is_empty() {
        return None;
    }
    Some(match value.to_str() {
        Ok(s) => s.to_owned(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })
}

/// Check the announced message name against the decode target `M`.
///
/// A missing or empty header is accepted: producers that predate the header
/// are treated as unverified rather than rejected.
pub fn verify_identity<M: Message>(
    format: &'static str,
    headers: &HeaderMap,
) -> Result<(), CodecError> {
    verify_name(format, headers, &M::message_name())
}

/// Same as [`verify_identity`] for an expected name known only at runtime.
pub fn verify_name(
    format: &'static str,
    headers: &HeaderMap,
    expected: &str,
) -> Result<(), CodecError> {
    match announced_name(headers) {
        Some(received) if received != expected => Err(CodecError::IdentityMismatch {
            format,
            expected: expected.to_owned(),
            received,
        }),
        _ => Ok(()),
    }
}
