use std::collections::BTreeMap;

/// A well-known envelope tag together with the maximum value length the
/// ingestion endpoint accepts for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContextTagKey {
    key: &'static str,
    max_len: usize,
}

impl ContextTagKey {
    const fn new(key: &'static str, max_len: usize) -> Self {
        ContextTagKey { key, max_len }
    }

    pub(crate) fn key(self) -> &'static str {
        self.key
    }
}

/// Application version of the component sending the telemetry.
pub(crate) const APPLICATION_VERSION: ContextTagKey =
    ContextTagKey::new("ai.application.ver", 1024);

/// Unique client device id.
pub(crate) const DEVICE_ID: ContextTagKey = ContextTagKey::new("ai.device.id", 1024);

/// Device locale, `<language>-<REGION>` per RFC 5646.
pub(crate) const DEVICE_LOCALE: ContextTagKey = ContextTagKey::new("ai.device.locale", 64);

/// Model of the end user's device.
pub(crate) const DEVICE_MODEL: ContextTagKey = ContextTagKey::new("ai.device.model", 256);

/// Client device OEM name.
pub(crate) const DEVICE_OEM_NAME: ContextTagKey = ContextTagKey::new("ai.device.oemName", 256);

/// Operating system name and version of the end user's device.
pub(crate) const DEVICE_OS_VERSION: ContextTagKey =
    ContextTagKey::new("ai.device.osVersion", 256);

/// Device class, e.g. `PC`, `Phone`, `Browser`.
pub(crate) const DEVICE_TYPE: ContextTagKey = ContextTagKey::new("ai.device.type", 64);

/// IP address of the client device. IPv4 and IPv6 are supported.
pub(crate) const LOCATION_IP: ContextTagKey = ContextTagKey::new("ai.location.ip", 46);

/// Country of the client device.
pub(crate) const LOCATION_COUNTRY: ContextTagKey =
    ContextTagKey::new("ai.location.country", 256);

/// Province or state of the client device.
pub(crate) const LOCATION_PROVINCE: ContextTagKey =
    ContextTagKey::new("ai.location.province", 256);

/// City of the client device.
pub(crate) const LOCATION_CITY: ContextTagKey = ContextTagKey::new("ai.location.city", 256);

/// Unique identifier of the operation instance. Created by a request or a
/// page view; all other telemetry copies the value of its containing
/// operation so related items can be found together.
pub(crate) const OPERATION_ID: ContextTagKey = ContextTagKey::new("ai.operation.id", 128);

/// Name (group) of the operation, e.g. `GET Home/Index`.
pub(crate) const OPERATION_NAME: ContextTagKey = ContextTagKey::new("ai.operation.name", 1024);

/// Unique identifier of the telemetry item's immediate parent.
pub(crate) const OPERATION_PARENT_ID: ContextTagKey =
    ContextTagKey::new("ai.operation.parentId", 128);

/// Name of the synthetic source generating the traffic, e.g. an
/// availability test.
pub(crate) const OPERATION_SYNTHETIC_SOURCE: ContextTagKey =
    ContextTagKey::new("ai.operation.syntheticSource", 1024);

/// Lightweight vector clock for ordering related events across services.
pub(crate) const OPERATION_CORRELATION_VECTOR: ContextTagKey =
    ContextTagKey::new("ai.operation.correlationVector", 64);

/// Instance of the end user's interaction with the app.
pub(crate) const SESSION_ID: ContextTagKey = ContextTagKey::new("ai.session.id", 64);

/// Whether the session is the user's first.
pub(crate) const SESSION_IS_FIRST: ContextTagKey =
    ContextTagKey::new("ai.session.isFirst", 5);

/// Account id or name the user is acting with in multi-tenant scenarios.
pub(crate) const USER_ACCOUNT_ID: ContextTagKey =
    ContextTagKey::new("ai.user.accountId", 1024);

/// Anonymous user id.
pub(crate) const USER_ID: ContextTagKey = ContextTagKey::new("ai.user.id", 128);

/// Authenticated user id; PII, not collected by default.
pub(crate) const USER_AUTH_USER_ID: ContextTagKey =
    ContextTagKey::new("ai.user.authUserId", 1024);

/// Name of the role the application is a part of. Maps directly to the
/// role name in Azure.
pub(crate) const CLOUD_ROLE: ContextTagKey = ContextTagKey::new("ai.cloud.role", 256);

/// Name of the instance where the application is running. Computer name
/// for on-premises, instance name for Azure.
pub(crate) const CLOUD_ROLE_INSTANCE: ContextTagKey =
    ContextTagKey::new("ai.cloud.roleInstance", 256);

/// SDK version that produced the telemetry.
pub(crate) const INTERNAL_SDK_VERSION: ContextTagKey =
    ContextTagKey::new("ai.internal.sdkVersion", 64);

/// Agent version, when data is collected by an agent.
pub(crate) const INTERNAL_AGENT_VERSION: ContextTagKey =
    ContextTagKey::new("ai.internal.agentVersion", 64);

/// Node name used for billing purposes.
pub(crate) const INTERNAL_NODE_NAME: ContextTagKey =
    ContextTagKey::new("ai.internal.nodeName", 256);

const CONTEXT_TAG_KEYS: &[ContextTagKey] = &[
    APPLICATION_VERSION,
    DEVICE_ID,
    DEVICE_LOCALE,
    DEVICE_MODEL,
    DEVICE_OEM_NAME,
    DEVICE_OS_VERSION,
    DEVICE_TYPE,
    LOCATION_IP,
    LOCATION_COUNTRY,
    LOCATION_PROVINCE,
    LOCATION_CITY,
    OPERATION_ID,
    OPERATION_NAME,
    OPERATION_PARENT_ID,
    OPERATION_SYNTHETIC_SOURCE,
    OPERATION_CORRELATION_VECTOR,
    SESSION_ID,
    SESSION_IS_FIRST,
    USER_ACCOUNT_ID,
    USER_ID,
    USER_AUTH_USER_ID,
    CLOUD_ROLE,
    CLOUD_ROLE_INSTANCE,
    INTERNAL_SDK_VERSION,
    INTERNAL_AGENT_VERSION,
    INTERNAL_NODE_NAME,
];

fn lookup(key: &str) -> Option<&'static ContextTagKey> {
    CONTEXT_TAG_KEYS.iter().find(|tag| tag.key == key)
}

/// Drops tags with unknown keys and truncates values to the per-key
/// maximum the contract allows. Returns advisory warnings.
pub(crate) fn sanitize_tags(tags: &mut BTreeMap<String, String>) -> Vec<String> {
    let mut warnings = Vec::new();

    let unknown: Vec<String> = tags
        .keys()
        .filter(|key| lookup(key).is_none())
        .cloned()
        .collect();
    for key in unknown {
        tags.remove(&key);
        warnings.push(format!("invalid tag key dropped: {}", key));
    }

    for (key, value) in tags.iter_mut() {
        let tag = lookup(key).expect("unknown keys were removed above");
        if crate::models::truncate_in_place(value, tag.max_len) {
            warnings.push(format!(
                "tag {} exceeded maximum length of {}",
                tag.key, tag.max_len
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_keys_are_dropped() {
        let mut tags = BTreeMap::from([
            (OPERATION_ID.key().to_string(), "abc".to_string()),
            ("custom.tag".to_string(), "x".to_string()),
        ]);
        let warnings = sanitize_tags(&mut tags);
        assert_eq!(warnings.len(), 1);
        assert!(tags.contains_key(OPERATION_ID.key()));
        assert!(!tags.contains_key("custom.tag"));
    }

    #[test]
    fn overlong_tag_values_are_truncated() {
        let mut tags = BTreeMap::from([(CLOUD_ROLE.key().to_string(), "r".repeat(300))]);
        let warnings = sanitize_tags(&mut tags);
        assert_eq!(warnings.len(), 1);
        assert_eq!(tags[CLOUD_ROLE.key()].len(), 256);
    }
}
