//! Application service: clone a template image into an application design.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use ravello_common::Value;

use crate::application::ports::IdentifierRewriter;
use crate::domain::{ApplicationDocument, CloneError, TemplateImage, clone_vm_name};

/// Append one copy of `template` to the application's VM list.
///
/// The copy is named `basename` + `index` and its `hostnames` becomes the
/// single-element list holding that name. Identifiers are regenerated after
/// renaming and before the copy joins the design.
///
/// Returns the new VM's name.
///
/// # Errors
///
/// Returns [`CloneError`] if the template has no `name` or the application has
/// no `design.vms` sequence; in that case the application is left untouched.
/// Errors from the identifier rewriter are propagated.
pub fn create_compute_vm(
    app: &mut ApplicationDocument,
    template: &TemplateImage,
    index: u32,
    basename: &str,
    rewriter: &mut impl IdentifierRewriter,
) -> Result<String> {
    template.name().map_err(CloneError::MalformedTemplate)?;
    app.vms().map_err(CloneError::MalformedApplication)?;

    let mut vm = template.document().clone();
    let name = clone_vm_name(basename, index);
    vm.insert("name", name.as_str());
    vm.insert("hostnames", vec![Value::from(name.as_str())]);
    rewriter
        .regenerate_identifiers(&mut vm)
        .with_context(|| format!("cannot regenerate identifiers for '{name}'"))?;

    app.vms_mut()
        .map_err(CloneError::MalformedApplication)?
        .push(Value::Document(vm));
    tracing::debug!(vm = %name, "appended clone to design");
    Ok(name)
}

/// Append `count` copies of `template`, indices `1..=count` in order.
///
/// Either every copy is appended or, on error, none is.
///
/// # Errors
///
/// Returns the first error raised by [`create_compute_vm`].
pub fn clone_vms(
    app: &mut ApplicationDocument,
    template: &TemplateImage,
    count: u32,
    basename: &str,
    rewriter: &mut impl IdentifierRewriter,
) -> Result<Vec<String>> {
    let mut staged = app.clone();
    let names = (1..=count)
        .map(|index| {
            create_compute_vm(&mut staged, template, index, basename, &mut *rewriter)
        })
        .collect::<Result<Vec<_>>>()?;
    *app = staged;
    Ok(names)
}
