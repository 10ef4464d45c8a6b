//! Post-processing applied to every envelope before it leaves a
//! translator: resource and instrumentation-library merge, cloud role
//! tagging and the sanitizer cascade.

use crate::models::{sanitize_tags, Envelope, Sanitize, CLOUD_ROLE, CLOUD_ROLE_INSTANCE};
use crate::pdata::{InstrumentationLibrary, Resource};
use crate::semconv;

/// Reserved property key carrying the instrumentation library name.
pub const INSTRUMENTATION_LIBRARY_NAME: &str = "instrumentationLibraryName";
/// Reserved property key carrying the instrumentation library version.
pub const INSTRUMENTATION_LIBRARY_VERSION: &str = "instrumentationLibraryVersion";

/// Finishes an envelope in place.
///
/// Resource attributes are copied into the payload properties (resource
/// values are always strings), the instrumentation library lands under the
/// reserved keys, and the `service.*` attributes turn into the cloud role
/// tags. The payload, envelope and tag sanitizers run last; their warnings
/// are logged and never reject the envelope.
pub(crate) fn finalize_envelope(
    envelope: &mut Envelope,
    resource: &Resource,
    library: Option<&InstrumentationLibrary>,
) {
    let properties = envelope.data.properties_mut();
    for (key, value) in &resource.attributes {
        properties.insert(key.clone(), value.clone());
    }

    if let Some(library) = library {
        if !library.name.is_empty() {
            properties.insert(
                INSTRUMENTATION_LIBRARY_NAME.to_string(),
                library.name.clone(),
            );
        }
        if !library.version.is_empty() {
            properties.insert(
                INSTRUMENTATION_LIBRARY_VERSION.to_string(),
                library.version.clone(),
            );
        }
    }

    if let Some(service_name) = resource.attributes.get(semconv::SERVICE_NAME) {
        let cloud_role = match resource.attributes.get(semconv::SERVICE_NAMESPACE) {
            Some(namespace) => format!("{}.{}", namespace, service_name),
            None => service_name.clone(),
        };
        envelope
            .tags
            .insert(CLOUD_ROLE.key().to_string(), cloud_role);
    }

    if let Some(instance) = resource.attributes.get(semconv::SERVICE_INSTANCE_ID) {
        envelope
            .tags
            .insert(CLOUD_ROLE_INSTANCE.key().to_string(), instance.clone());
    }

    for warning in envelope.data.sanitize() {
        log::warn!("{}", warning);
    }
    for warning in envelope.sanitize() {
        log::warn!("{}", warning);
    }
    for warning in sanitize_tags(&mut envelope.tags) {
        log::warn!("{}", warning);
    }
}
