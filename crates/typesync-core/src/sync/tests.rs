use super::*;
use crate::{
    editor::{EditorRef, EditorTable},
    entity::{CompositionRef, ContentTypeRecord, DataTypeRecord, RuntimeId},
    factory::{SyncCategories, SyncRunner, SynchronizerFactory},
    store::{DEFAULT_CONTENT_ICON, DEFAULT_THUMBNAIL, EntityStore, MemoryBackend},
    tracking::{IdentityTracker, MemoryTracker},
};
use typesync_schema::{
    decl::{MemberDecl, PropertyAttr, TypeAttr, TypeDecl},
    model::{ModelDetail, build_models},
    registry::{StaticScanner, TypeRegistry},
    types::ValueType,
    validate::ConflictKind,
};
use uuid::{Uuid, uuid};

// site: document types with inheritance, compositions and allowed children

const PAGE_ID: Uuid = uuid!("0b5e0c1e-6a43-4f0e-8d0b-2c6d1e7a9f01");
const TITLE_ID: Uuid = uuid!("0b5e0c1e-6a43-4f0e-8d0b-2c6d1e7a9f02");
const ARTICLE_ID: Uuid = uuid!("0b5e0c1e-6a43-4f0e-8d0b-2c6d1e7a9f03");

static SEO_MEMBERS: [MemberDecl; 1] = [MemberDecl::new("meta_title", ValueType::Text)];
static SEO: TypeDecl = TypeDecl::new("site::Seo", "Seo")
    .with_members(&SEO_MEMBERS)
    .with_marker(TypeAttr::new(Category::DocumentType, "SEO"));

static BANNER_MEMBERS: [MemberDecl; 1] = [MemberDecl::new("caption", ValueType::Text)];
static BANNER: TypeDecl = TypeDecl::new("site::Banner", "Banner")
    .with_members(&BANNER_MEMBERS)
    .with_marker(TypeAttr::new(Category::DocumentType, "Banner"));

static PAGE_MEMBERS: [MemberDecl; 2] = [
    MemberDecl::new("title", ValueType::Text).with_attr(PropertyAttr {
        id: Some(TITLE_ID),
        group: Some("Content"),
        mandatory: true,
        ..PropertyAttr::EMPTY
    }),
    MemberDecl::new("body", ValueType::Text).with_attr(PropertyAttr {
        editor: Some("richtext"),
        group: Some("Content"),
        ..PropertyAttr::EMPTY
    }),
];
static PAGE: TypeDecl = TypeDecl::new("site::Page", "Page")
    .with_members(&PAGE_MEMBERS)
    .with_marker(
        TypeAttr::new(Category::DocumentType, "Page")
            .with_id(PAGE_ID)
            .with_allowed_children(&["site::ListingBase", "site::Article"]),
    );

static LISTING_BASE_MEMBERS: [MemberDecl; 1] =
    [MemberDecl::new("page_size", ValueType::Integer)];
static LISTING_BASE: TypeDecl = TypeDecl::new("site::ListingBase", "ListingBase")
    .with_base("site::Page")
    .with_members(&LISTING_BASE_MEMBERS);

static ARTICLE_MEMBERS: [MemberDecl; 1] = [MemberDecl::new("summary", ValueType::Text)];
static ARTICLE: TypeDecl = TypeDecl::new("site::Article", "Article")
    .with_base("site::ListingBase")
    .with_members(&ARTICLE_MEMBERS)
    .with_marker(
        TypeAttr::new(Category::DocumentType, "Article")
            .with_id(ARTICLE_ID)
            .with_compositions(&["site::Seo", "site::Banner"]),
    );

static NEWS: TypeDecl = TypeDecl::new("site::News", "News")
    .with_base("site::ListingBase")
    .with_marker(TypeAttr::new(Category::DocumentType, "News"));

static LANDING: TypeDecl = TypeDecl::new("site::Landing", "Landing").with_marker(
    TypeAttr::new(Category::DocumentType, "Landing")
        .with_compositions(&["site::Seo", "site::Banner", "site::Seo"]),
);

// blog: the two-model page/article scenario

static BLOG_PAGE_MEMBERS: [MemberDecl; 1] = [MemberDecl::new("title", ValueType::Text)];
static BLOG_PAGE: TypeDecl = TypeDecl::new("blog::Page", "Page")
    .with_members(&BLOG_PAGE_MEMBERS)
    .with_marker(TypeAttr::new(Category::DocumentType, "Page"));
static BLOG_ARTICLE: TypeDecl = TypeDecl::new("blog::Article", "Article")
    .with_base("blog::Page")
    .with_marker(TypeAttr::new(Category::DocumentType, "Article"));

// club: member types, the second one has no editor mapping

const MEMBER_ID: Uuid = uuid!("5d2f8c90-1b7e-4c3a-a6f4-9e0d3b2c1a01");
const NICKNAME_ID: Uuid = uuid!("5d2f8c90-1b7e-4c3a-a6f4-9e0d3b2c1a02");

static CLUB_MEMBER_MEMBERS: [MemberDecl; 1] =
    [MemberDecl::new("nickname", ValueType::Text).with_attr(PropertyAttr {
        id: Some(NICKNAME_ID),
        ..PropertyAttr::EMPTY
    })];
static CLUB_MEMBER: TypeDecl = TypeDecl::new("club::Member", "Member")
    .with_members(&CLUB_MEMBER_MEMBERS)
    .with_marker(TypeAttr::new(Category::MemberType, "Member").with_id(MEMBER_ID));

static CLUB_GUEST_MEMBERS: [MemberDecl; 2] = [
    MemberDecl::new("name", ValueType::Text),
    MemberDecl::new("visited", ValueType::Date),
];
static CLUB_GUEST: TypeDecl = TypeDecl::new("club::Guest", "Guest")
    .with_members(&CLUB_GUEST_MEMBERS)
    .with_marker(TypeAttr::new(Category::MemberType, "Guest"));

static CLUB_STAFF_MEMBERS: [MemberDecl; 1] = [MemberDecl::new("role", ValueType::Text)];
static CLUB_STAFF: TypeDecl = TypeDecl::new("club::Staff", "Staff")
    .with_members(&CLUB_STAFF_MEMBERS)
    .with_marker(TypeAttr::new(Category::MemberType, "Staff"));

// shop: member types built on one unannotated base

const EMAIL_ID: Uuid = uuid!("9a41c7e2-3d58-4b6f-8e21-7c0f5a9d4b01");

static ACCOUNT_MEMBERS: [MemberDecl; 1] =
    [MemberDecl::new("email", ValueType::Text).with_attr(PropertyAttr {
        id: Some(EMAIL_ID),
        ..PropertyAttr::EMPTY
    })];
static ACCOUNT: TypeDecl = TypeDecl::new("shop::Account", "Account").with_members(&ACCOUNT_MEMBERS);
static CUSTOMER: TypeDecl = TypeDecl::new("shop::Customer", "Customer")
    .with_base("shop::Account")
    .with_marker(TypeAttr::new(Category::MemberType, "Customer"));
static STAFF: TypeDecl = TypeDecl::new("shop::Staff", "Staff")
    .with_base("shop::Account")
    .with_marker(TypeAttr::new(Category::MemberType, "Staff"));

// data types and conflicts

static BAZ: TypeDecl = TypeDecl::new("dt::Baz", "Baz").with_marker(TypeAttr {
    editor: Some("Umbraco.TextBox"),
    ..TypeAttr::new(Category::DataType, "Baz")
});
static SHARED_DATA_TYPE: TypeDecl = TypeDecl::new("dt::Shared", "Shared")
    .with_marker(TypeAttr::new(Category::DataType, "Shared").with_id(PAGE_ID));

static PROMO: TypeDecl = TypeDecl::new("dup::Promo", "Promo")
    .with_marker(TypeAttr::new(Category::DocumentType, "Promo"));
static OFFER: TypeDecl = TypeDecl::new("dup::Offer", "Offer")
    .with_marker(TypeAttr::new(Category::DocumentType, "Offer").with_alias("PROMO"));

///
/// Harness
///

struct Harness {
    backend: MemoryBackend,
    tracker: MemoryTracker,
    editors: EditorTable,
}

impl Harness {
    fn new() -> Self {
        Self {
            backend: MemoryBackend::default(),
            tracker: MemoryTracker::new(),
            editors: EditorTable::new()
                .with_value_type(ValueType::Text, EditorRef::new("Umbraco.TextBox", "Textstring"))
                .with_value_type(ValueType::Integer, EditorRef::new("Umbraco.Integer", "Numeric"))
                .with_hint("richtext", EditorRef::new("Umbraco.TinyMCE", "Richtext editor")),
        }
    }

    fn run(&mut self, category: Category, models: &[Model]) -> Result<SyncReport, SyncError> {
        let ctx = SyncContext::new(&mut self.tracker, &self.editors);
        SynchronizerFactory::create(category, &mut self.backend, ctx).run(models)
    }

    fn document(&self, alias: &str) -> ContentTypeRecord {
        self.backend
            .document_types
            .get_by_alias(alias)
            .unwrap()
            .unwrap_or_else(|| panic!("no document type '{alias}'"))
    }

    fn document_id(&self, alias: &str) -> RuntimeId {
        self.document(alias).id.unwrap()
    }
}

fn models(decls: &[&'static TypeDecl], category: Category) -> Vec<Model> {
    let registry = TypeRegistry::from_scanner(&StaticScanner::new(decls.iter().copied()));
    build_models(&registry, category).unwrap()
}

fn site() -> Vec<Model> {
    models(
        &[&SEO, &BANNER, &PAGE, &LISTING_BASE, &ARTICLE, &NEWS, &LANDING],
        Category::DocumentType,
    )
}

fn model_mut<'a>(models: &'a mut [Model], alias: &str) -> &'a mut Model {
    models.iter_mut().find(|m| m.alias == alias).unwrap()
}

fn seeded(alias: &str) -> ContentTypeRecord {
    ContentTypeRecord {
        alias: alias.to_string(),
        name: alias.to_string(),
        ..ContentTypeRecord::default()
    }
}

#[test]
fn page_and_article_end_to_end() {
    let mut h = Harness::new();
    let models = models(&[&BLOG_PAGE, &BLOG_ARTICLE], Category::DocumentType);

    let first = h.run(Category::DocumentType, &models).unwrap();
    assert_eq!(first.created, ["page", "article"]);
    assert_eq!(first.properties_created, 1);
    assert_eq!(first.relations.parents_set, 1);

    let page = h.document("page");
    let article = h.document("article");
    assert!(page.property("title").is_some());
    assert_eq!(article.parent, page.id);
    assert_eq!(article.property_types().count(), 0);

    let second = h.run(Category::DocumentType, &models).unwrap();
    assert!(second.created.is_empty());
    assert_eq!(second.properties_created, 0);
    assert_eq!(second.unchanged, ["page", "article"]);
    assert_eq!(h.document("article").parent, page.id);
    assert_eq!(h.backend.document_types.len(), 2);
}

#[test]
fn second_run_changes_nothing() {
    let mut h = Harness::new();
    let models = site();

    h.run(Category::DocumentType, &models).unwrap();
    let before = h.backend.document_types.records().to_vec();

    let report = h.run(Category::DocumentType, &models).unwrap();

    assert!(report.is_noop(), "{report:?}");
    assert_eq!(report.models(), models.len());
    assert_eq!(h.backend.document_types.records(), before.as_slice());
}

#[test]
fn tracking_is_recorded_for_entities_and_properties() {
    let mut h = Harness::new();
    h.run(Category::DocumentType, &site()).unwrap();

    let page = h.document("page");
    let title = page.property("title").unwrap();

    assert_eq!(h.tracker.lookup_entity(PAGE_ID).unwrap(), page.id);
    assert_eq!(h.tracker.lookup_property(page.id.unwrap(), TITLE_ID).unwrap(), title.id);
    assert_eq!(h.tracker.lookup_entity(ARTICLE_ID).unwrap(), Some(h.document_id("article")));
}

#[test]
fn renamed_model_keeps_its_record() {
    let mut h = Harness::new();
    let mut models = site();
    h.run(Category::DocumentType, &models).unwrap();
    let page_id = h.document_id("page");
    let title_id = h.document("page").property("title").unwrap().id;

    let page = model_mut(&mut models, "page");
    page.alias = "bar".to_string();
    if let ModelDetail::Composable { properties, .. } = &mut page.detail {
        properties[0].alias = "heading".to_string();
    }
    let report = h.run(Category::DocumentType, &models).unwrap();

    let renamed = h.document("bar");
    assert_eq!(renamed.id, Some(page_id));
    assert_eq!(renamed.property("heading").unwrap().id, title_id);
    assert!(renamed.property("title").is_none());
    assert!(report.created.is_empty());
    assert_eq!(report.updated, ["bar"]);
    assert_eq!(h.backend.document_types.len(), models.len());
}

#[test]
fn shared_base_property_survives_rename_in_every_model() {
    let mut h = Harness::new();
    let mut models = models(&[&ACCOUNT, &CUSTOMER, &STAFF], Category::MemberType);
    h.run(Category::MemberType, &models).unwrap();

    let member = |h: &Harness, alias: &str| {
        h.backend.member_types.get_by_alias(alias).unwrap().unwrap()
    };
    let before: Vec<_> = ["customer", "staff"]
        .into_iter()
        .map(|alias| {
            let record = member(&h, alias);
            (record.id.unwrap(), record.property("email").unwrap().id)
        })
        .collect();
    for (owner, email_id) in &before {
        assert_eq!(h.tracker.lookup_property(*owner, EMAIL_ID).unwrap(), *email_id);
    }

    for model in &mut models {
        if let ModelDetail::Content { properties } = &mut model.detail {
            properties[0].alias = "mail".to_string();
        }
    }
    let report = h.run(Category::MemberType, &models).unwrap();

    assert_eq!(report.properties_created, 0);
    assert_eq!(report.properties_updated, 2);
    for (alias, (_, email_id)) in ["customer", "staff"].into_iter().zip(&before) {
        let record = member(&h, alias);
        assert_eq!(record.property("mail").unwrap().id, *email_id, "{alias}");
        assert!(record.property("email").is_none(), "{alias}");
        assert_eq!(record.property_types().count(), 1, "{alias}");
    }
}

#[test]
fn untracked_model_matches_by_alias() {
    let mut h = Harness::new();
    let seeded = h.backend.data_types.insert(DataTypeRecord {
        alias: "BAZ".to_string(),
        name: "Legacy".to_string(),
        ..DataTypeRecord::default()
    });
    let models = models(&[&BAZ], Category::DataType);

    let report = h.run(Category::DataType, &models).unwrap();

    assert_eq!(report.updated, ["baz"]);
    assert_eq!(h.backend.data_types.len(), 1);
    let record = h.backend.data_types.get(seeded).unwrap();
    assert_eq!(record.alias, "baz");
    assert_eq!(record.editor_alias, "Umbraco.TextBox");
}

#[test]
fn inheritance_clears_compositions() {
    let mut h = Harness::new();
    let seo = h.backend.document_types.insert(seeded("seo"));
    let banner = h.backend.document_types.insert(seeded("banner"));
    h.backend.document_types.insert(ContentTypeRecord {
        compositions: vec![
            CompositionRef {
                id: seo,
                alias: "seo".to_string(),
            },
            CompositionRef {
                id: banner,
                alias: "banner".to_string(),
            },
        ],
        ..seeded("article")
    });

    let report = h.run(Category::DocumentType, &site()).unwrap();

    let article = h.document("article");
    assert_eq!(article.parent, Some(h.document_id("page")));
    assert!(article.compositions.is_empty());
    assert_eq!(report.relations.compositions_removed, 2);
}

#[test]
fn compositions_follow_declaration_and_drop_stale_entries() {
    let mut h = Harness::new();
    let stale = h.backend.document_types.insert(seeded("legacy"));
    h.backend.document_types.insert(ContentTypeRecord {
        compositions: vec![CompositionRef {
            id: stale,
            alias: "legacy".to_string(),
        }],
        ..seeded("landing")
    });

    let report = h.run(Category::DocumentType, &site()).unwrap();

    let aliases: Vec<_> = h
        .document("landing")
        .compositions
        .iter()
        .map(|c| c.alias.clone())
        .collect();
    assert_eq!(aliases, ["seo", "banner"]);
    assert_eq!(report.relations.compositions_removed, 1);
    assert_eq!(report.relations.compositions_added, 2);
}

#[test]
fn unresolvable_edges_are_skipped() {
    let mut h = Harness::new();
    let mut models = site();
    if let ModelDetail::Composable { hierarchy, .. } = &mut model_mut(&mut models, "landing").detail {
        hierarchy.compositions.push("site::Missing");
    }

    let report = h.run(Category::DocumentType, &models).unwrap();

    assert_eq!(report.relations.skipped_edges, 1);
    assert_eq!(h.document("landing").compositions.len(), 2);
}

#[test]
fn allowed_children_resolve_through_base_types() {
    let mut h = Harness::new();
    h.run(Category::DocumentType, &site()).unwrap();

    let page = h.document("page");
    let children: Vec<_> = page
        .allowed_children
        .iter()
        .map(|c| (c.alias.as_str(), c.sort_order))
        .collect();

    assert_eq!(children, [("article", 0), ("news", 1)]);
    assert_eq!(page.allowed_children[0].id, h.document_id("article"));
}

#[test]
fn property_group_change_moves_property() {
    let mut h = Harness::new();
    let mut models = site();
    h.run(Category::DocumentType, &models).unwrap();
    let title_id = h.document("page").property("title").unwrap().id;

    if let ModelDetail::Composable { properties, .. } = &mut model_mut(&mut models, "page").detail {
        properties[0].group = Some("SEO".to_string());
    }
    let report = h.run(Category::DocumentType, &models).unwrap();

    let page = h.document("page");
    assert_eq!(page.group_of("title"), Some(Some("SEO")));
    assert_eq!(page.property("title").unwrap().id, title_id);
    assert_eq!(page.property_types().filter(|p| p.alias == "title").count(), 1);
    assert_eq!(page.group("Content").unwrap().properties.len(), 1);
    assert_eq!(report.properties_updated, 1);
    assert_eq!(report.properties_created, 0);
}

#[test]
fn missing_editor_mapping_aborts_in_flight_model() {
    let mut h = Harness::new();
    let models = models(&[&CLUB_MEMBER, &CLUB_GUEST, &CLUB_STAFF], Category::MemberType);

    let err = h.run(Category::MemberType, &models).unwrap_err();

    assert!(matches!(
        &err,
        SyncError::NoMappingFound { model, property, .. } if model == "guest" && property == "visited"
    ));
    let store = &h.backend.member_types;
    assert_eq!(store.len(), 1);
    let member = store.get_by_alias("member").unwrap().unwrap();
    assert_eq!(h.tracker.lookup_entity(MEMBER_ID).unwrap(), member.id);
    assert_eq!(
        h.tracker.lookup_property(member.id.unwrap(), NICKNAME_ID).unwrap(),
        member.property("nickname").unwrap().id
    );
    assert!(store.get_by_alias("guest").unwrap().is_none());
    assert!(store.get_by_alias("staff").unwrap().is_none());
}

#[test]
fn conflicts_block_every_mutation() {
    let mut h = Harness::new();
    let models = models(&[&PROMO, &OFFER], Category::DocumentType);

    let err = h.run(Category::DocumentType, &models).unwrap_err();

    let SyncError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(validation.of_kind(ConflictKind::DuplicateAlias).count(), 1);
    assert_eq!(h.backend.document_types.saves(), 0);
}

#[test]
fn foreign_models_are_rejected() {
    let mut h = Harness::new();
    let models = models(&[&BAZ], Category::DataType);

    let err = h.run(Category::DocumentType, &models).unwrap_err();

    assert!(matches!(
        err,
        SyncError::CategoryMismatch {
            expected: Category::DocumentType,
            found: Category::DataType,
            ..
        }
    ));
}

#[test]
fn deleted_record_is_recreated_and_retracked() {
    let mut h = Harness::new();
    let models = site();
    h.run(Category::DocumentType, &models).unwrap();
    let old = h.document_id("page");

    h.backend.document_types.remove(old);
    let report = h.run(Category::DocumentType, &models).unwrap();

    let new = h.document_id("page");
    assert_ne!(new, old);
    assert_eq!(report.created, ["page"]);
    assert_eq!(h.tracker.lookup_entity(PAGE_ID).unwrap(), Some(new));
}

#[test]
fn unset_icon_resets_to_platform_default() {
    let mut h = Harness::new();
    h.backend.document_types.insert(ContentTypeRecord {
        icon: "icon-custom".to_string(),
        thumbnail: "custom.png".to_string(),
        ..seeded("news")
    });

    h.run(Category::DocumentType, &site()).unwrap();

    let news = h.document("news");
    assert_eq!(news.icon, DEFAULT_CONTENT_ICON);
    assert_eq!(news.thumbnail, DEFAULT_THUMBNAIL);
}

#[test]
fn runner_rejects_ids_shared_across_categories() {
    let mut backend = MemoryBackend::default();
    let mut tracker = MemoryTracker::new();
    let editors = EditorTable::new();
    let registry = TypeRegistry::from_scanner(&StaticScanner::new([&SHARED_DATA_TYPE, &PAGE]));

    let mut runner = SyncRunner::new(&mut backend, &mut tracker, &editors);
    let err = runner.run(&registry).unwrap_err();

    let SyncError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(validation.of_kind(ConflictKind::DuplicateId).count(), 1);
    assert!(backend.data_types.is_empty());
}

#[test]
fn runner_runs_selected_categories_in_order() {
    let mut h = Harness::new();
    let registry = TypeRegistry::from_scanner(&StaticScanner::new([
        &BLOG_PAGE,
        &BLOG_ARTICLE,
        &BAZ,
        &CLUB_MEMBER,
    ]));

    let reports = SyncRunner::new(&mut h.backend, &mut h.tracker, &h.editors)
        .with_categories(SyncCategories::DATA_TYPES | SyncCategories::DOCUMENT_TYPES)
        .run(&registry)
        .unwrap();

    let order: Vec<_> = reports.iter().map(|r| r.category).collect();
    assert_eq!(order, [Some(Category::DataType), Some(Category::DocumentType)]);
    assert_eq!(h.backend.data_types.len(), 1);
    assert_eq!(h.backend.document_types.len(), 2);
    assert!(h.backend.member_types.is_empty());
}
