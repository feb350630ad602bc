// Well-known WS method names — must match AG-UI client expectations.

// handshake
pub const CONNECT: &str = "connect";

// utility
pub const PING: &str = "ping";

// event generation
pub const EVENT_GENERATE: &str = "event.generate";

// template registry
pub const TEMPLATES_LIST: &str = "templates.list";
pub const TEMPLATES_REGISTER: &str = "templates.register";
pub const TEMPLATES_REMOVE: &str = "templates.remove";

// per-connection UI state
pub const STATE_SET: &str = "state.set";
pub const STATE_GET: &str = "state.get";
pub const SESSION_INFO: &str = "session.info";

// specialized flows
pub const FLOW_AGENT_CREATE: &str = "flow.agent_create";
pub const FLOW_WELCOME: &str = "flow.welcome";
pub const FLOW_HEALTH: &str = "flow.health";
pub const FLOW_AGENTS: &str = "flow.agents";
pub const FLOW_STATUS: &str = "flow.status";
