//! OpenTelemetry semantic convention attribute keys.
//!
//! The Application Insights mapping was written against the 1.0-era
//! conventions, so the keys are pinned here rather than pulled from a
//! moving registry.

pub(crate) const SERVICE_NAME: &str = "service.name";
pub(crate) const SERVICE_NAMESPACE: &str = "service.namespace";
pub(crate) const SERVICE_INSTANCE_ID: &str = "service.instance.id";

pub(crate) const HTTP_METHOD: &str = "http.method";
pub(crate) const HTTP_URL: &str = "http.url";
pub(crate) const HTTP_TARGET: &str = "http.target";
pub(crate) const HTTP_HOST: &str = "http.host";
pub(crate) const HTTP_SCHEME: &str = "http.scheme";
pub(crate) const HTTP_STATUS_CODE: &str = "http.status_code";
pub(crate) const HTTP_SERVER_NAME: &str = "http.server_name";
pub(crate) const HTTP_ROUTE: &str = "http.route";
pub(crate) const HTTP_CLIENT_IP: &str = "http.client_ip";

pub(crate) const NET_PEER_IP: &str = "net.peer.ip";
pub(crate) const NET_PEER_PORT: &str = "net.peer.port";
pub(crate) const NET_PEER_NAME: &str = "net.peer.name";
pub(crate) const NET_HOST_NAME: &str = "net.host.name";
pub(crate) const NET_HOST_PORT: &str = "net.host.port";

pub(crate) const RPC_SYSTEM: &str = "rpc.system";

pub(crate) const DB_SYSTEM: &str = "db.system";
pub(crate) const DB_STATEMENT: &str = "db.statement";
pub(crate) const DB_OPERATION: &str = "db.operation";

pub(crate) const MESSAGING_SYSTEM: &str = "messaging.system";
pub(crate) const MESSAGING_URL: &str = "messaging.url";

pub(crate) const FAAS_TRIGGER: &str = "faas.trigger";
