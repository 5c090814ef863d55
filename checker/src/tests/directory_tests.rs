use super::fixtures;
use crate::directory::{directory_url, parse_directory, profile_url, SITE_BASE_URL};

#[test]
fn test_sample_directory_parsing() {
    let html = fixtures::load_html_fixture("directory");
    let table = parse_directory(&html);

    assert_eq!(table.len(), 2);

    let first = &table.researchers[0];
    assert_eq!(first.name, "山田 太郎");
    assert_eq!(first.kana, "ヤマダ タロウ");
    assert_eq!(first.profile_url, "https://researchmap.jp/taro_yamada");
    assert!(first.raw_markup.is_empty());
    assert!(first.updated_date.is_empty());

    let second = &table.researchers[1];
    assert_eq!(second.name, "佐藤 花子");
    assert_eq!(second.kana, "サトウ ハナコ");
    assert_eq!(second.profile_url, "https://researchmap.jp/hanako-sato");
}

#[test]
fn test_every_card_becomes_a_record_in_order() {
    let cards: Vec<(String, String, String)> = (0..7)
        .map(|i| {
            (
                format!("カナ {}", i),
                format!("Name {}", i),
                format!("/researcher_{}", i),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str, &str)> = cards
        .iter()
        .map(|(k, n, h)| (k.as_str(), n.as_str(), h.as_str()))
        .collect();

    let table = parse_directory(&fixtures::directory_page(&borrowed));

    assert_eq!(table.len(), 7);
    for (i, record) in table.iter().enumerate() {
        assert_eq!(record.name, format!("Name {}", i));
        assert!(record.profile_url.starts_with(SITE_BASE_URL));
        assert_eq!(
            record.profile_url,
            format!("https://researchmap.jp/researcher_{}", i)
        );
    }
}

#[test]
fn test_mismatched_blocks_truncate_to_shorter() {
    let html = r#"
    <html><body>
        <div class="rm-cv-card-kana">ア</div>
        <div class="rm-cv-card-kana">イ</div>
        <div class="rm-cv-card-kana">ウ</div>
        <div class="rm-cv-card-kana">エ</div>
        <div class="rm-cv-card-kana">オ</div>
        <div class="rm-cv-card-name"><a href="/a">A</a></div>
        <div class="rm-cv-card-name"><a href="/b">B</a></div>
        <div class="rm-cv-card-name"><a href="/c">C</a></div>
    </body></html>
    "#;

    let table = parse_directory(html);
    assert_eq!(table.len(), 3);
    let kana: Vec<&str> = table.iter().map(|r| r.kana.as_str()).collect();
    assert_eq!(kana, vec!["ア", "イ", "ウ"]);
}

#[test]
fn test_same_name_is_kept_twice() {
    let html = fixtures::directory_page(&[
        ("タナカ", "田中", "/tanaka1"),
        ("タナカ", "田中", "/tanaka2"),
    ]);
    let table = parse_directory(&html);
    assert_eq!(table.len(), 2);
    assert_eq!(table.researchers[0].profile_url, "https://researchmap.jp/tanaka1");
    assert_eq!(table.researchers[1].profile_url, "https://researchmap.jp/tanaka2");
}

#[test]
fn test_card_without_link_is_skipped() {
    let html = r#"
    <html><body>
        <div class="rm-cv-card-kana">ア</div>
        <div class="rm-cv-card-name">No Link</div>
        <div class="rm-cv-card-kana">イ</div>
        <div class="rm-cv-card-name"><a href="/b">B</a></div>
    </body></html>
    "#;

    let table = parse_directory(html);
    assert_eq!(table.len(), 1);
    assert_eq!(table.researchers[0].name, "B");
    assert_eq!(table.researchers[0].kana, "イ");
}

#[test]
fn test_page_without_cards_is_empty() {
    let html = fixtures::load_html_fixture("profile_no_marker");
    assert!(parse_directory(&html).is_empty());
    assert!(parse_directory("").is_empty());
}

#[test]
fn test_directory_url() {
    assert_eq!(
        directory_url("6520", 200).unwrap(),
        "https://researchmap.jp/researchers?institution_code=6520&limit=200"
    );
    assert_eq!(
        directory_url("65 20&x", 10).unwrap(),
        "https://researchmap.jp/researchers?institution_code=65+20%26x&limit=10"
    );
}

#[test]
fn test_profile_url_resolution() {
    assert_eq!(
        profile_url("/read0123").as_deref(),
        Some("https://researchmap.jp/read0123")
    );
    assert_eq!(
        profile_url("read0123").as_deref(),
        Some("https://researchmap.jp/read0123")
    );
    assert_eq!(
        profile_url("https://researchmap.jp/other").as_deref(),
        Some("https://researchmap.jp/other")
    );
    assert_eq!(profile_url("   "), None);
    assert_eq!(profile_url("https://example.com/read0123"), None);
    assert_eq!(profile_url("//example.com/read0123"), None);
    assert_eq!(profile_url("http://researchmap.jp/read0123"), None);
}

#[test]
fn test_off_site_link_is_skipped() {
    let html = fixtures::directory_page(&[
        ("ア", "A", "https://example.com/a"),
        ("イ", "B", "/b"),
    ]);
    let table = parse_directory(&html);
    assert_eq!(table.len(), 1);
    assert_eq!(table.researchers[0].profile_url, "https://researchmap.jp/b");
    assert!(table.iter().all(|r| r.profile_url.starts_with(SITE_BASE_URL)));
}
