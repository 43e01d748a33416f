//! Tests for the `clone` application service.
//!
//! Covers naming, hostnames, identifier regeneration order, deep-copy
//! isolation and the all-or-nothing guarantee of `clone_vms`.

#![allow(clippy::expect_used)]

use ravello_common::{Document, Value, collect_luids};
use ravello_publish::application::ports::IdentifierRewriter;
use ravello_publish::application::services::clone::{clone_vms, create_compute_vm};
use ravello_publish::domain::{ApplicationDocument, CloneError, TemplateImage};

use crate::helpers::{
    CountingRewriter, all_vm_luids, application, hostnames, is_unique, parse, seeded_rewriter,
    template, template_doc, vm_docs,
};

// ── create_compute_vm ─────────────────────────────────────────────────────────

#[test]
fn test_create_compute_vm_appends_named_clone() {
    let mut app = application();
    let name = create_compute_vm(&mut app, &template(), 1, "web", &mut seeded_rewriter(1))
        .expect("clone");

    assert_eq!(name, "web1");
    let vms = vm_docs(&app);
    assert_eq!(vms.len(), 2);
    assert_eq!(vms[1].require_str("name").expect("name"), "web1");
    assert_eq!(hostnames(&vms[1]), vec!["web1"]);
}

#[test]
fn test_create_compute_vm_keeps_existing_vms_first() {
    let mut app = application();
    create_compute_vm(&mut app, &template(), 1, "web", &mut seeded_rewriter(1)).expect("clone");
    let vms = vm_docs(&app);
    assert_eq!(vms[0].require_str("name").expect("name"), "gateway");
}

#[test]
fn test_create_compute_vm_copies_template_fields() {
    let mut app = application();
    create_compute_vm(&mut app, &template(), 4, "db", &mut seeded_rewriter(1)).expect("clone");
    let clone = &vm_docs(&app)[1];
    assert_eq!(clone.get("numCpus"), Some(&Value::Integer(2)));
    assert_eq!(
        clone.get("description").and_then(Value::as_str),
        Some("compute node")
    );
}

#[test]
fn test_create_compute_vm_regenerates_identifiers_after_renaming() {
    let mut app = application();
    let mut rewriter = CountingRewriter::new();
    create_compute_vm(&mut app, &template(), 2, "web", &mut rewriter).expect("clone");
    assert_eq!(rewriter.rewritten, vec!["web2"]);

    let clone = &vm_docs(&app)[1];
    assert!(collect_luids(clone).is_disjoint(&collect_luids(&template_doc())));
}

#[test]
fn test_create_compute_vm_repoints_internal_references() {
    let mut app = application();
    create_compute_vm(&mut app, &template(), 1, "web", &mut seeded_rewriter(9)).expect("clone");
    let clone = &vm_docs(&app)[1];

    let root_drive = clone.sequence_at(&["hardDrives"]).expect("drives")[0]
        .as_document()
        .and_then(|d| d.get("id"))
        .and_then(Value::as_i64)
        .expect("drive id");
    let boot = clone
        .at_path(&["bootOrder", "bootDeviceId"])
        .expect("boot device")
        .as_i64();
    assert_eq!(boot, Some(root_drive));
    assert_ne!(root_drive, 200);
}

#[test]
fn test_create_compute_vm_keeps_reference_to_source_image() {
    let mut app = application();
    create_compute_vm(&mut app, &template(), 1, "web", &mut seeded_rewriter(3)).expect("clone");
    let clone = &vm_docs(&app)[1];
    assert_eq!(clone.get("baseVmId").and_then(Value::as_i64), Some(54_321));
}

#[test]
fn test_create_compute_vm_inserts_hostnames_when_template_has_none() {
    let image: Document = template_doc()
        .iter()
        .filter(|(k, _)| k.as_str() != "hostnames")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut app = application();
    create_compute_vm(
        &mut app,
        &TemplateImage::new(image),
        1,
        "web",
        &mut seeded_rewriter(1),
    )
    .expect("clone");
    assert_eq!(hostnames(&vm_docs(&app)[1]), vec!["web1"]);
}

#[test]
fn test_create_compute_vm_without_design_is_malformed_application() {
    let mut app = ApplicationDocument::new(parse(r#"{"id":1,"name":"bare"}"#));
    let before = app.clone();
    let err = create_compute_vm(&mut app, &template(), 1, "web", &mut seeded_rewriter(1))
        .expect_err("no design");
    assert!(matches!(
        err.downcast_ref::<CloneError>(),
        Some(CloneError::MalformedApplication(_))
    ));
    assert_eq!(err.to_string(), "malformed application: missing field 'design'");
    assert_eq!(app, before);
}

#[test]
fn test_create_compute_vm_template_without_name_is_malformed_template() {
    let mut app = application();
    let before = app.clone();
    let mut rewriter = CountingRewriter::new();
    let err = create_compute_vm(
        &mut app,
        &TemplateImage::new(parse(r#"{"id":5}"#)),
        1,
        "web",
        &mut rewriter,
    )
    .expect_err("nameless template");
    assert_eq!(err.to_string(), "malformed template: missing field 'name'");
    assert!(rewriter.rewritten.is_empty());
    assert_eq!(app, before);
}

// ── clone_vms ─────────────────────────────────────────────────────────────────

#[test]
fn test_clone_vms_web_times_three() {
    let mut app = application();
    let names = clone_vms(&mut app, &template(), 3, "web", &mut seeded_rewriter(5)).expect("clone");

    assert_eq!(names, vec!["web1", "web2", "web3"]);
    let vms = vm_docs(&app);
    let all_names: Vec<_> = vms
        .iter()
        .map(|vm| vm.require_str("name").expect("name").to_string())
        .collect();
    assert_eq!(all_names, vec!["gateway", "web1", "web2", "web3"]);
    for vm in &vms[1..] {
        let name = vm.require_str("name").expect("name");
        assert_eq!(hostnames(vm), vec![name.to_string()]);
    }
}

#[test]
fn test_clone_vms_index_ten_has_no_padding() {
    let mut app = application();
    let names = clone_vms(&mut app, &template(), 10, "n", &mut seeded_rewriter(5)).expect("clone");
    assert_eq!(names.last().map(String::as_str), Some("n10"));
    assert_eq!(names.first().map(String::as_str), Some("n1"));
}

#[test]
fn test_clone_vms_zero_count_leaves_design_unchanged() {
    let mut app = application();
    let before = app.clone();
    let mut rewriter = CountingRewriter::new();
    let names = clone_vms(&mut app, &template(), 0, "web", &mut rewriter).expect("clone");
    assert!(names.is_empty());
    assert!(rewriter.rewritten.is_empty());
    assert_eq!(app, before);
}

#[test]
fn test_clone_vms_invokes_rewriter_once_per_clone_in_order() {
    let mut app = application();
    let mut rewriter = CountingRewriter::new();
    clone_vms(&mut app, &template(), 4, "w", &mut rewriter).expect("clone");
    assert_eq!(rewriter.rewritten, vec!["w1", "w2", "w3", "w4"]);
}

#[test]
fn test_clone_vms_identifiers_unique_across_design() {
    let mut app = application();
    let mut rewriter = seeded_rewriter(11);
    rewriter.reserve(app.document());
    clone_vms(&mut app, &template(), 5, "web", &mut rewriter).expect("clone");
    assert!(is_unique(&all_vm_luids(&app)));
    assert!(is_unique(
        &collect_luids(app.document()).into_iter().collect::<Vec<_>>()
    ));
}

#[test]
fn test_clone_vms_leaves_template_untouched() {
    let image = template();
    let snapshot = image.clone();
    let mut app = application();
    clone_vms(&mut app, &image, 3, "web", &mut seeded_rewriter(2)).expect("clone");
    assert_eq!(image, snapshot);
}

#[test]
fn test_clone_vms_siblings_do_not_share_structure() {
    let mut app = application();
    clone_vms(&mut app, &template(), 2, "web", &mut seeded_rewriter(2)).expect("clone");

    let vms = app.vms_mut().expect("vms");
    let first = vms[1].as_document_mut().expect("vm");
    first.insert("numCpus", 64_i64);

    let vms = vm_docs(&app);
    assert_eq!(vms[2].get("numCpus"), Some(&Value::Integer(2)));
}

#[test]
fn test_clone_vms_failure_midway_appends_nothing() {
    let mut app = application();
    let before = app.clone();
    let mut rewriter = CountingRewriter::failing_on(3);
    let err = clone_vms(&mut app, &template(), 5, "web", &mut rewriter).expect_err("fails");
    assert!(format!("{err:#}").contains("rewriter exploded"));
    assert!(err.to_string().contains("web3"));
    assert_eq!(app, before);
}

#[test]
fn test_clone_vms_huge_count_fails_cleanly_on_first_error() {
    let mut app = application();
    let before = app.clone();
    let mut rewriter = CountingRewriter::failing_on(1);
    let err = clone_vms(&mut app, &template(), u32::MAX, "web", &mut rewriter)
        .expect_err("first clone fails");
    assert!(err.to_string().contains("web1"));
    assert_eq!(rewriter.rewritten, vec!["web1"]);
    assert_eq!(app, before);
}
