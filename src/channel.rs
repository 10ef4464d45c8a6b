use crate::models::Envelope;

/// The transport the exporter hands finished envelopes to.
///
/// `send` is fire-and-forget: the exporter does not await delivery and
/// transport failures are invisible to it. Implementations own queuing,
/// serialization and the wire protocol, and must be safe to call from
/// concurrent exports.
pub trait TransportChannel: Send + Sync {
    /// Accepts one envelope for delivery.
    fn send(&self, envelope: Envelope);
}
