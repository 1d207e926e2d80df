//! Shared messages.

pub struct CommonMessages {
    pub error_generic: &'static str,
    pub root_required: &'static str,
    pub ssh_key_missing: &'static str,
    pub command_failed: &'static str,
}

pub const COMMON_MESSAGES: CommonMessages = CommonMessages {
    error_generic: "Error: {error}",
    root_required: "This command needs access to system files. Please run as root (sudo).",
    ssh_key_missing: "It seems like you don't have any SSH keys. Run `ssh-keygen -t rsa -C \"your_email@example.com\"` to generate keys.",
    command_failed: "❌ `{command}` exited with status {status}",
};
