use pressmark_core::{AuthorTable, FrontMatter, MetaPairs, PostItem, RawItem, RawTerm, TermDomain};
use pretty_assertions::assert_eq;
use serde_yaml::Value;

fn sample_item(meta: MetaPairs) -> PostItem {
    let raw = RawItem {
        title: "Hello, World!".into(),
        status: "publish".into(),
        post_type: Some("post".into()),
        post_date: "2020-03-05 10:00:00".into(),
        creator: "jdoe".into(),
        excerpt_html: "<p>In short</p>".into(),
        terms: vec![RawTerm {
            domain: TermDomain::Category,
            label: "News".into(),
        }],
        meta,
        ..RawItem::default()
    };
    PostItem::from_raw(&raw).unwrap()
}

fn authors() -> AuthorTable {
    [("jdoe", "Jane Doe")].into_iter().collect()
}

#[test]
fn keys_are_emitted_in_fixed_order() {
    let front = FrontMatter::build(&sample_item(MetaPairs::new()), &authors(), false);
    let yaml = front.to_yaml().unwrap();

    let keys: Vec<&str> = yaml
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.starts_with('-'))
        .filter_map(|line| line.split_once(':').map(|(k, _)| k))
        .collect();
    assert_eq!(
        keys,
        vec![
            "layout",
            "title",
            "page_title",
            "page_description",
            "date",
            "type",
            "published",
            "categories",
            "tags",
            "author",
            "excerpt",
        ]
    );
}

#[test]
fn values_round_trip_through_yaml() {
    let front = FrontMatter::build(&sample_item(MetaPairs::new()), &authors(), false);
    let value: Value = serde_yaml::from_str(&front.to_yaml().unwrap()).unwrap();

    assert_eq!(value["layout"].as_str(), Some("post"));
    assert_eq!(value["title"].as_str(), Some("Hello, World!"));
    assert_eq!(value["page_title"].as_str(), Some("Hello, World!"));
    assert!(value["page_description"].is_null());
    assert_eq!(value["date"].as_str(), Some("2020-03-05 10:00:00"));
    assert_eq!(value["type"].as_str(), Some("post"));
    assert_eq!(value["published"].as_bool(), Some(true));
    assert_eq!(value["categories"][0].as_str(), Some("news"));
    assert_eq!(value["author"].as_str(), Some("Jane Doe"));
    assert_eq!(value["excerpt"].as_str(), Some("In short"));
    assert!(value.get("meta").is_none());
}

#[test]
fn seo_metadata_overrides_title_and_description() {
    let meta: MetaPairs = [
        ("_yoast_wpseo_title", "SEO Title"),
        ("_yoast_wpseo_metadesc", "SEO description"),
        ("other", "x"),
    ]
    .into_iter()
    .collect();
    let front = FrontMatter::build(&sample_item(meta), &authors(), false);

    assert_eq!(front.title, "Hello, World!");
    assert_eq!(front.page_title, "SEO Title");
    assert_eq!(front.page_description.as_deref(), Some("SEO description"));
}

#[test]
fn unknown_author_is_absent() {
    let front = FrontMatter::build(&sample_item(MetaPairs::new()), &AuthorTable::new(), false);
    assert_eq!(front.author, None);
}

#[test]
fn include_meta_embeds_ordered_mapping() {
    let meta: MetaPairs = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
    let front = FrontMatter::build(&sample_item(meta), &authors(), true);
    let yaml = front.to_yaml().unwrap();

    let zeta = yaml.find("zeta").unwrap();
    let alpha = yaml.find("alpha").unwrap();
    assert!(zeta < alpha, "metadata order lost:\n{yaml}");

    let value: Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["meta"]["alpha"].as_str(), Some("2"));
}
