// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end runs over temporary source trees.

use std::{fs, path::Path};

use jdl_reverse::{
    EmitOptions, Error, Model, PackageScope, SourceTree, TypeDiscovery,
    emit::{FieldCase, ServiceStyle},
    metadata::RelationKind,
    model::Advisory,
    reverse
};
use tempfile::TempDir;

fn tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        let path = dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn run(root: &Path, scope: &str) -> String {
    reverse(
        &SourceTree::new(root),
        &PackageScope::parse(scope),
        &EmitOptions::default()
    )
    .unwrap()
}

const SHOP: &[(&str, &str)] = &[
    ("lib.rs", "pub mod model;\npub mod service;\n"),
    (
        "model/mod.rs",
        r#"
mod order;

#[entity]
pub struct Customer {
    pub name: String,
    pub status: CustomerStatus,

    #[one_to_many(mapped_by = "customer")]
    pub orders: Vec<Order>,
}

pub enum CustomerStatus {
    ACTIVE,
    INACTIVE,
}
"#
    ),
    (
        "model/order.rs",
        r#"
#[entity]
pub struct Order {
    #[many_to_one]
    pub customer: Customer,
}
"#
    ),
    (
        "service.rs",
        r#"
#[entity]
pub struct AuditRecord {
    pub action: String,
}
"#
    )
];

#[test]
fn customer_order_scenario() {
    let dir = tree(SHOP);
    let document = run(dir.path(), "crate::model");

    let expected = "\
enum CustomerStatus {
  ACTIVE,
  INACTIVE
}

entity Customer {
  name String
}

entity Order {

}

relationship OneToMany {
  Customer{orders(customer)} to Order
}

relationship ManyToOne {
  Order{customer} to Customer
}

paginate Customer with pagination

paginate Order with pagination

dto Customer with mapstruct
service Customer with serviceClass

dto Order with mapstruct
service Order with serviceClass

";
    assert_eq!(document, expected);
}

#[test]
fn runs_are_byte_identical() {
    let dir = tree(SHOP);
    assert_eq!(run(dir.path(), ""), run(dir.path(), ""));
}

#[test]
fn scope_limits_candidates() {
    let dir = tree(SHOP);

    let everything = run(dir.path(), "");
    assert!(everything.contains("entity AuditRecord {\n  action String\n}"));

    let service_only = run(dir.path(), "service");
    assert!(service_only.starts_with("entity AuditRecord {"));
    assert!(!service_only.contains("Customer"));
}

#[test]
fn subtypes_join_their_entities() {
    let dir = tree(&[
        (
            "lib.rs",
            r#"
#[entity]
pub struct Account {
    pub balance: i64,
}

#[extends(Account)]
pub struct SavingsAccount {
    pub rate: f32,
}

#[extends(SavingsAccount)]
pub struct FixedDeposit {
    pub term_months: u16,
}

pub struct Unrelated {
    pub x: i32,
}
"#
        )
    ]);

    let candidates = SourceTree::new(dir.path())
        .discover(&PackageScope::all())
        .unwrap();
    let names: Vec<_> = candidates.iter().map(|class| class.name.as_str()).collect();
    assert_eq!(names, ["Account", "SavingsAccount", "FixedDeposit"]);

    let document = run(dir.path(), "");
    assert!(document.contains("entity FixedDeposit {\n  term_months u16\n}"));
    assert!(!document.contains("Unrelated"));
}

#[test]
fn transient_static_and_synthetic_fields_are_dropped() {
    let dir = tree(&[(
        "lib.rs",
        r#"
use std::marker::PhantomData;

#[entity]
pub struct Invoice<T> {
    pub number: String,

    #[transient]
    pub preview: String,

    #[transient]
    #[many_to_one]
    pub draft_owner: User,

    _tag: PhantomData<T>,
}

impl<T> Invoice<T> {
    pub const PREFIX: &'static str = "INV";
}
"#
    )]);

    let document = run(dir.path(), "");
    assert!(document.contains("entity Invoice {\n  number String\n}"));
    assert!(!document.contains("preview"));
    assert!(!document.contains("draft_owner"));
    assert!(!document.contains("PREFIX"));
    assert!(!document.contains("_tag"));
    assert!(!document.contains("relationship"));
}

#[test]
fn shared_enum_appears_once_at_first_use() {
    let dir = tree(&[(
        "lib.rs",
        r#"
#[entity]
pub struct Shipment {
    pub priority: Priority,
    pub carrier: Carrier,
}

#[entity]
pub struct Ticket {
    pub priority: Option<Priority>,
}

pub enum Carrier { DHL, UPS }
pub enum Priority { LOW, HIGH }
"#
    )]);

    let document = run(dir.path(), "");
    assert_eq!(document.matches("enum Priority {").count(), 1);
    let priority = document.find("enum Priority").unwrap();
    let carrier = document.find("enum Carrier").unwrap();
    assert!(priority < carrier);
}

#[test]
fn array_field_without_target_points_at_its_element() {
    let dir = tree(&[(
        "lib.rs",
        r#"
#[entity]
pub struct Customer {
    #[one_to_many(mapped_by = "customer")]
    pub orders: [Order; 8],
}
"#
    )]);

    let document = run(dir.path(), "");
    assert!(document.contains("  Customer{orders(customer)} to Order\n"));
}

#[test]
fn self_referencing_tree_names_its_own_entity() {
    let dir = tree(&[(
        "lib.rs",
        r#"
#[jdl::entity]
pub struct Category {
    pub title: String,

    #[jdl::many_to_one]
    pub parent: Option<Box<Self>>,

    #[one_to_many(mapped_by = "parent")]
    pub children: Vec<Self>,
}
"#
    )]);

    let document = run(dir.path(), "");
    assert!(document.contains("relationship ManyToOne {\n  Category{parent} to Category\n}"));
    assert!(document.contains("relationship OneToMany {\n  Category{children(parent)} to Category\n}"));
    assert!(!document.contains("Self"));
}

#[test]
fn advisories_are_visible_on_the_model() {
    let dir = tree(&[(
        "lib.rs",
        r#"
#[entity]
pub struct Student {
    #[many_to_many]
    pub courses: Vec<Course>,
}

#[entity]
pub struct Course {
    #[many_to_many(mapped_by = "courses")]
    pub students: Vec<Student>,
}
"#
    )]);

    let candidates = SourceTree::new(dir.path())
        .discover(&PackageScope::all())
        .unwrap();
    let model = Model::build(&candidates);

    let kinds: Vec<_> = model.relationships.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, [RelationKind::ManyToMany, RelationKind::ManyToMany]);
    assert_eq!(model.advisories, vec![Advisory::AmbiguousOwnership {
        entity: "Student".into(),
        field:  "courses".into()
    }]);
}

#[test]
fn options_reach_the_document() {
    let dir = tree(SHOP);
    let options = EmitOptions::default()
        .with_field_case(FieldCase::Camel)
        .with_service(ServiceStyle::ServiceImpl);
    let document = reverse(&SourceTree::new(dir.path()), &PackageScope::all(), &options).unwrap();

    assert!(document.contains("service AuditRecord with serviceImpl\n"));
}

#[test]
fn malformed_markers_abort_the_run() {
    let dir = tree(&[(
        "lib.rs",
        r#"
#[entity]
pub struct Order {
    #[many_to_one(mapped_by = "orders")]
    pub customer: Customer,
}
"#
    )]);

    let error = reverse(
        &SourceTree::new(dir.path()),
        &PackageScope::all(),
        &EmitOptions::default()
    )
    .unwrap_err();
    assert!(matches!(error, Error::Declaration { .. }));
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let error = reverse(
        &SourceTree::new(dir.path().join("absent")),
        &PackageScope::all(),
        &EmitOptions::default()
    )
    .unwrap_err();
    assert!(matches!(error, Error::MissingRoot(_)));
}

#[test]
fn empty_tree_renders_an_empty_document() {
    let dir = tree(&[("lib.rs", "pub fn helper() {}\n")]);
    assert_eq!(run(dir.path(), ""), "");
}
