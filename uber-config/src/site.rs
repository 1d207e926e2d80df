// Standard library
use std::fmt;
use std::str::FromStr;

// External crates
use serde_yaml_ng::Value;
use uber_core::error::{Result, UberError};
use uber_core::validation::{validate_hostname, validate_site_name};

// Internal imports
use crate::raw::SiteDoc;

pub const DEFAULT_WEBROOT: &str = "web";

/// A local web project served by the machine.
///
/// `name` identifies the site inside its `Config` and is compared
/// case-sensitively. The name is stored exactly as entered; only the derived
/// database name is normalised (see [`crate::db_hint::database_name_for`]).
///
/// Construction checks the name and domain. Whether `directory` exists is
/// checked once by the registration workflow before the site is persisted,
/// so a document that points at a moved project still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    name: String,
    domain: String,
    directory: String,
    webroot: String,
}

impl Site {
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        directory: impl Into<String>,
        webroot: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        let domain = domain.into();

        validate_site_name(&name)?;
        validate_hostname(&domain).map_err(|e| {
            UberError::Validation(format!(
                "Site '{}': invalid domain '{}': {}",
                name,
                domain,
                reason(e)
            ))
        })?;

        Ok(Self {
            name,
            domain,
            directory: directory.into(),
            webroot: webroot.unwrap_or_else(|| DEFAULT_WEBROOT.to_string()),
        })
    }

    /// Build a site from one entry of the document's `sites` list.
    ///
    /// `name`, `domain` and `directory` are required; `webroot` defaults to
    /// `web` when absent or null. Numbers are accepted where strings are
    /// expected.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Self::from_doc(SiteDoc::from_value(raw)?)
    }

    pub(crate) fn from_doc(doc: SiteDoc) -> Result<Self> {
        Self::new(doc.name, doc.domain, doc.directory, doc.webroot)
    }

    /// Fields are always emitted in the order name, domain, directory, webroot.
    pub(crate) fn to_doc(&self) -> SiteDoc {
        SiteDoc {
            name: self.name.clone(),
            domain: self.domain.clone(),
            directory: self.directory.clone(),
            webroot: Some(self.webroot.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn webroot(&self) -> &str {
        &self.webroot
    }

    pub fn attribute(&self, attribute: SiteAttribute) -> &str {
        match attribute {
            SiteAttribute::Name => &self.name,
            SiteAttribute::Domain => &self.domain,
            SiteAttribute::Directory => &self.directory,
            SiteAttribute::Webroot => &self.webroot,
        }
    }

    pub fn database_name(&self) -> String {
        crate::db_hint::database_name_for(&self.name)
    }
}

fn reason(err: UberError) -> String {
    match err {
        UberError::Validation(message) => message,
        other => other.to_string(),
    }
}

/// The attributes a site exposes for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteAttribute {
    Name,
    Domain,
    Directory,
    Webroot,
}

impl SiteAttribute {
    pub const ALL: [SiteAttribute; 4] = [
        SiteAttribute::Name,
        SiteAttribute::Domain,
        SiteAttribute::Directory,
        SiteAttribute::Webroot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteAttribute::Name => "name",
            SiteAttribute::Domain => "domain",
            SiteAttribute::Directory => "directory",
            SiteAttribute::Webroot => "webroot",
        }
    }
}

impl FromStr for SiteAttribute {
    type Err = UberError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(SiteAttribute::Name),
            "domain" => Ok(SiteAttribute::Domain),
            "directory" => Ok(SiteAttribute::Directory),
            "webroot" => Ok(SiteAttribute::Webroot),
            other => Err(UberError::UnknownAttribute(other.to_string())),
        }
    }
}

impl fmt::Display for SiteAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_site(yaml: &str) -> Value {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_new_defaults_webroot() {
        let site = Site::new("blog", "blog.dev", "/srv/blog", None).unwrap();
        assert_eq!(site.webroot(), "web");

        let site = Site::new("blog", "blog.dev", "/srv/blog", Some("public".into())).unwrap();
        assert_eq!(site.webroot(), "public");
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let err = Site::new("   ", "blog.dev", "/srv/blog", None).unwrap_err();
        assert!(matches!(err, UberError::Validation(_)));
    }

    #[test]
    fn test_new_rejects_bad_domains() {
        for domain in ["-bad-.com", "exa mple.com", "", "a..b"] {
            let err = Site::new("blog", domain, "/srv/blog", None).unwrap_err();
            assert!(
                matches!(err, UberError::Validation(_)),
                "domain {:?} should be rejected",
                domain
            );
        }
        let long = "a".repeat(300);
        assert!(Site::new("blog", long, "/srv/blog", None).is_err());
    }

    #[test]
    fn test_name_is_stored_verbatim() {
        let site = Site::new("My Blog!", "blog.dev", "/srv/blog", None).unwrap();
        assert_eq!(site.name(), "My Blog!");
        assert_eq!(site.database_name(), "my_blog");
    }

    #[test]
    fn test_from_raw() {
        let site = Site::from_raw(&raw_site(
            "name: blog\ndomain: www.blog.dev\ndirectory: /srv/blog\nwebroot: public\n",
        ))
        .unwrap();
        assert_eq!(site.name(), "blog");
        assert_eq!(site.domain(), "www.blog.dev");
        assert_eq!(site.directory(), "/srv/blog");
        assert_eq!(site.webroot(), "public");
    }

    #[test]
    fn test_from_raw_webroot_missing_or_null() {
        let site =
            Site::from_raw(&raw_site("name: blog\ndomain: blog.dev\ndirectory: /srv/blog\n"))
                .unwrap();
        assert_eq!(site.webroot(), DEFAULT_WEBROOT);

        let site = Site::from_raw(&raw_site(
            "name: blog\ndomain: blog.dev\ndirectory: /srv/blog\nwebroot: ~\n",
        ))
        .unwrap();
        assert_eq!(site.webroot(), DEFAULT_WEBROOT);
    }

    #[test]
    fn test_from_raw_accepts_numeric_name() {
        let site =
            Site::from_raw(&raw_site("name: 2024\ndomain: y2024.dev\ndirectory: /srv/2024\n"))
                .unwrap();
        assert_eq!(site.name(), "2024");
    }

    #[test]
    fn test_from_raw_missing_field() {
        let err = Site::from_raw(&raw_site("name: blog\ndirectory: /srv/blog\n")).unwrap_err();
        match err {
            UberError::Validation(message) => {
                assert!(message.contains("missing field"), "{}", message);
                assert!(message.contains("domain"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_from_raw_rejects_non_mapping() {
        assert!(Site::from_raw(&Value::from("blog")).is_err());
        assert!(Site::from_raw(&raw_site("[a, b]")).is_err());
    }

    #[test]
    fn test_from_raw_rejects_nested_values() {
        let err = Site::from_raw(&raw_site(
            "name: [blog]\ndomain: blog.dev\ndirectory: /srv/blog\n",
        ))
        .unwrap_err();
        assert!(matches!(err, UberError::Validation(_)));
    }

    #[test]
    fn test_from_raw_rejects_null_required_field() {
        let err = Site::from_raw(&raw_site("name: ~\ndomain: blog.dev\ndirectory: /srv/blog\n"))
            .unwrap_err();
        assert!(matches!(err, UberError::Validation(_)));
    }

    #[test]
    fn test_to_doc_key_order() {
        let site = Site::new("blog", "blog.dev", "/srv/blog", None).unwrap();
        let yaml = serde_yaml_ng::to_string(&site.to_doc()).unwrap();
        assert_eq!(
            yaml,
            "name: blog\ndomain: blog.dev\ndirectory: /srv/blog\nwebroot: web\n"
        );
    }

    #[test]
    fn test_attribute_parsing() {
        assert_eq!("domain".parse::<SiteAttribute>().unwrap(), SiteAttribute::Domain);
        assert_eq!("webroot".parse::<SiteAttribute>().unwrap(), SiteAttribute::Webroot);
        let err = "color".parse::<SiteAttribute>().unwrap_err();
        assert!(matches!(err, UberError::UnknownAttribute(ref a) if a == "color"));
        // attribute names are exact
        assert!("Name".parse::<SiteAttribute>().is_err());
    }
}
