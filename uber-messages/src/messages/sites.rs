//! Site registration messages.

pub struct SiteMessages {
    pub ask_name: &'static str,
    pub ask_domain: &'static str,
    pub ask_directory: &'static str,
    pub ask_webroot: &'static str,
    pub name_required: &'static str,
    pub name_taken: &'static str,
    pub domain_invalid: &'static str,
    pub directory_missing: &'static str,
    pub add_success: &'static str,
    pub delete_success: &'static str,
    pub delete_not_found: &'static str,
    pub db_hint_written: &'static str,
    pub db_creating: &'static str,
    pub db_created: &'static str,
    pub db_failed: &'static str,
    pub list_empty: &'static str,
    pub list_header: &'static str,
}

pub const SITE_MESSAGES: SiteMessages = SiteMessages {
    ask_name: "Assign a name for the site (allowed characters a-zA-Z0-9-_)",
    ask_domain: "Domain (www.example.dev)",
    ask_directory: "Directory (/some/example/folder)",
    ask_webroot: "Webroot",
    name_required: "You need to provide a name for this site!",
    name_taken: "A site named '{name}' already exists!",
    domain_invalid: "This is not a valid domain name!",
    directory_missing: "The folder does not exist. Try again.",
    add_success: "✅ Added site '{name}' ({domain})",
    delete_success: "✅ Removed site '{name}'",
    delete_not_found: "No site named '{name}' is registered",
    db_hint_written: "📝 Wrote database hint to {path}",
    db_creating: "Creating database '{name}'...",
    db_created: "✅ Database '{name}' is ready",
    db_failed: "Could not create database '{name}': {error}",
    list_empty: "No sites registered yet. Add one with: uberstead sites add",
    list_header: "📋 Registered sites",
};
