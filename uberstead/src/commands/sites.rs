// Site command handlers

use colored::Colorize;
use tracing::{debug, warn};
use uber_config::db_hint::{DATABASE_PASSWORD, DATABASE_USER};
use uber_config::site::DEFAULT_WEBROOT;
use uber_config::{Site, SiteAttribute};
use uber_core::error::{Result, UberError};
use uber_core::prompt::{Prompter, Validator};
use uber_core::validation::{validate_directory_exists, validate_hostname, validate_site_name};
use uber_core::{uber_info, uber_println, uber_progress, uber_success, uber_warning};
use uber_messages::{msg, MESSAGES};

use crate::cli::SiteAddArgs;
use crate::context::AppContext;

/// Register a site: make sure machine settings exist, collect the site's
/// fields, save it, then write the database hint and create the database.
pub fn handle_add(ctx: &mut AppContext, args: &SiteAddArgs) -> Result<()> {
    if ctx.config.update_config(ctx.prompter.as_ref(), false)? {
        uber_success!(
            "{}",
            msg!(
                MESSAGES.config.saved,
                path = ctx.config.location().display().to_string()
            )
        );
    }

    let site = collect_site(ctx, args)?;
    let database = site.database_name();
    ctx.config.add_site(site.clone())?;
    uber_success!(
        "{}",
        msg!(
            MESSAGES.sites.add_success,
            name = site.name(),
            domain = site.domain()
        )
    );

    if let Some(path) = ctx.config.set_db_hint_in_parameters_yml(&site)? {
        uber_success!(
            "{}",
            msg!(MESSAGES.sites.db_hint_written, path = path.display().to_string())
        );
    }

    if args.no_database {
        debug!(site = site.name(), "skipping database creation");
        return Ok(());
    }
    create_database(ctx, &database)
}

pub fn handle_delete(ctx: &mut AppContext, name: &str) -> Result<()> {
    if ctx.config.delete_site_by_name(name)? {
        uber_success!("{}", msg!(MESSAGES.sites.delete_success, name = name));
    } else {
        uber_info!("{}", msg!(MESSAGES.sites.delete_not_found, name = name));
    }
    Ok(())
}

pub fn handle_list(ctx: &mut AppContext, attribute: Option<&str>) -> Result<()> {
    if let Some(attribute) = attribute {
        for value in ctx.config.get_site_attribute_list(attribute)? {
            uber_println!("{}", value);
        }
        return Ok(());
    }

    let config = ctx.config.config()?;
    if config.sites().is_empty() {
        uber_info!("{}", MESSAGES.sites.list_empty);
        return Ok(());
    }

    uber_println!("{}", MESSAGES.sites.list_header.bold());
    for row in format_table(config.sites()) {
        uber_println!("{}", row);
    }
    Ok(())
}

pub fn handle_hosts_row(ctx: &mut AppContext) -> Result<()> {
    uber_println!("{}", ctx.config.create_row_for_hosts_file()?);
    Ok(())
}

/// Build the new site from flags, asking for whatever was not given.
///
/// Flag values go through the same checks as typed answers but fail instead
/// of asking again.
fn collect_site(ctx: &mut AppContext, args: &SiteAddArgs) -> Result<Site> {
    let taken: Vec<String> = ctx
        .config
        .config()?
        .site_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let prompter = ctx.prompter.as_ref();

    let check_name = |answer: &str| check_new_name(answer, &taken);
    let name = given_or_ask(
        prompter,
        args.name.as_deref(),
        MESSAGES.sites.ask_name,
        &check_name,
    )?;
    let domain = given_or_ask(
        prompter,
        args.domain.as_deref(),
        MESSAGES.sites.ask_domain,
        &check_domain,
    )?;
    let directory = expand_directory(&given_or_ask(
        prompter,
        args.directory.as_deref(),
        MESSAGES.sites.ask_directory,
        &check_directory,
    )?);

    let webroot = match args.webroot.as_deref() {
        Some(webroot) => webroot.trim().to_string(),
        None => prompter
            .ask(MESSAGES.sites.ask_webroot, Some(DEFAULT_WEBROOT), None)?
            .trim()
            .to_string(),
    };
    let webroot = (!webroot.is_empty()).then_some(webroot);

    Site::new(name, domain, directory, webroot)
}

fn given_or_ask(
    prompter: &dyn Prompter,
    given: Option<&str>,
    prompt: &str,
    validator: Validator<'_>,
) -> Result<String> {
    let answer = match given {
        Some(value) => {
            validator(value)?;
            value.to_string()
        }
        None => prompter.ask(prompt, None, Some(validator))?,
    };
    Ok(answer.trim().to_string())
}

fn check_new_name(answer: &str, taken: &[String]) -> Result<()> {
    let name = answer.trim();
    validate_site_name(name)
        .map_err(|_| UberError::Validation(MESSAGES.sites.name_required.to_string()))?;
    if taken.iter().any(|existing| existing == name) {
        return Err(UberError::Validation(msg!(
            MESSAGES.sites.name_taken,
            name = name
        )));
    }
    Ok(())
}

fn check_domain(answer: &str) -> Result<()> {
    validate_hostname(answer.trim())
        .map_err(|_| UberError::Validation(MESSAGES.sites.domain_invalid.to_string()))
}

fn check_directory(answer: &str) -> Result<()> {
    validate_directory_exists(&expand_directory(answer))
        .map_err(|_| UberError::Validation(MESSAGES.sites.directory_missing.to_string()))
}

fn expand_directory(answer: &str) -> String {
    shellexpand::tilde(answer.trim()).into_owned()
}

/// Database creation failing does not undo the registration.
fn create_database(ctx: &mut AppContext, name: &str) -> Result<()> {
    let host = ctx.config.config()?.ip().to_string();
    uber_progress!("{}", msg!(MESSAGES.sites.db_creating, name = name));

    match ctx
        .database
        .create_database(&host, DATABASE_USER, DATABASE_PASSWORD, name)
    {
        Ok(()) => uber_success!("{}", msg!(MESSAGES.sites.db_created, name = name)),
        Err(e) => {
            warn!(database = name, error = %e, "database creation failed");
            uber_warning!(
                "{}",
                msg!(
                    MESSAGES.sites.db_failed,
                    name = name,
                    error = e.to_string()
                )
            );
        }
    }
    Ok(())
}

fn format_table(sites: &[Site]) -> Vec<String> {
    let header: Vec<String> = SiteAttribute::ALL
        .iter()
        .map(|attribute| attribute.as_str().to_uppercase())
        .collect();
    let rows: Vec<Vec<&str>> = sites
        .iter()
        .map(|site| {
            SiteAttribute::ALL
                .iter()
                .map(|attribute| site.attribute(*attribute))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|column| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(header[column].len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    std::iter::once(render_row(&header.iter().map(String::as_str).collect::<Vec<_>>(), &widths))
        .chain(rows.iter().map(|row| render_row(row, &widths)))
        .collect()
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
