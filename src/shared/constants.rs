// =============================================================================
// PAGE MESSAGES
// =============================================================================

pub const MSG_LINK_ADDED: &str = "Your link was added!";

pub const MSG_PASSCODE_MISMATCH: &str = "The passcode does not match. Link not added.";

pub const MSG_ALREADY_ADDED: &str = "That link has already been added.";

pub const MSG_URL_NOT_ALLOWED: &str = "Sorry, that URL is not allowed.";

/// Body of every internal-error response
pub const TECHNICAL_ISSUES_MESSAGE: &str = "sorry, we're having technical issues";

// =============================================================================
// TEMPLATES
// =============================================================================

/// Category page template, relative to the templates directory
pub const PAGE_TEMPLATE: &str = "linkit.html";

/// "You are lost" template, relative to the templates directory
pub const LOST_TEMPLATE: &str = "youarelost.html";
