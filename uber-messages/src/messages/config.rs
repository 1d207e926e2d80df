//! Machine settings and configuration document messages.

pub struct ConfigMessages {
    pub configure_header: &'static str,
    pub confirm_update: &'static str,
    pub confirm_generate: &'static str,
    pub ask_ip: &'static str,
    pub ask_memory: &'static str,
    pub ask_cpus: &'static str,
    pub aborting: &'static str,
    pub saved: &'static str,
}

pub const CONFIG_MESSAGES: ConfigMessages = ConfigMessages {
    configure_header: ">>> Configure Server <<<",
    confirm_update: "This will update your server settings. Continue?",
    confirm_generate: "{path} does not exist! Would you like to generate it?",
    ask_ip: "Which IP would you like to assign to the server?",
    ask_memory: "Amount of memory (MB)",
    ask_cpus: "Number of CPU cores",
    aborting: "Aborting.",
    saved: "✅ Saved server settings to {path}",
};
