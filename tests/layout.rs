//! Tests for the paginating layout engine.

use tournament_reports_web::report::layout::{
    render_groups, ColumnSpec, DrawOp, PageComposer, ReportPage, TableGroup, TableRow, FOOTER_Y,
};

fn count_text(pages: &[ReportPage], needle: &str) -> usize {
    pages
        .iter()
        .flat_map(|p| p.texts())
        .filter(|t| *t == needle)
        .count()
}

fn page_with_text(pages: &[ReportPage], needle: &str) -> Option<usize> {
    pages.iter().position(|p| p.texts().iter().any(|t| *t == needle))
}

fn plain_rows(n: usize) -> Vec<TableRow> {
    (0..n)
        .map(|i| TableRow {
            cells: vec![format!("R{i}"), "x".to_string()],
            sub_lines: Vec::new(),
        })
        .collect()
}

fn two_columns() -> Vec<ColumnSpec> {
    vec![ColumnSpec::new("No", 30.0), ColumnSpec::new("値", 60.0)]
}

#[test]
fn single_page_has_title_and_footer() {
    let mut composer = PageComposer::new("浦和カップ運営事務局");
    composer.title("タイトル");
    composer.subtitle("サブタイトル");
    let pages = composer.finish();

    assert_eq!(pages.len(), 1);
    let texts = pages[0].texts();
    assert_eq!(texts[0], "タイトル");
    assert!(texts.contains(&"サブタイトル"));
    assert!(texts.contains(&"浦和カップ運営事務局"));
}

#[test]
fn footer_is_stamped_on_every_page_at_fixed_height() {
    let mut composer = PageComposer::new("フッター");
    composer.title("T");
    let groups = vec![TableGroup {
        title: "【G】".to_string(),
        rows: plain_rows(120),
    }];
    render_groups(&mut composer, &two_columns(), &groups);
    let pages = composer.finish();

    assert!(pages.len() >= 2);
    for page in &pages {
        let stamped = page.ops.iter().any(|op| {
            matches!(op, DrawOp::Text { y, text, .. } if *y == FOOTER_Y && text == "フッター")
        });
        assert!(stamped);
    }
}

#[test]
fn long_group_breaks_pages_without_losing_rows() {
    let mut composer = PageComposer::new("f");
    composer.title("T");
    let groups = vec![TableGroup {
        title: "【G】".to_string(),
        rows: plain_rows(60),
    }];
    render_groups(&mut composer, &two_columns(), &groups);
    let pages = composer.finish();

    assert!(pages.len() >= 2);
    for i in 0..60 {
        assert_eq!(count_text(&pages, &format!("R{i}")), 1);
    }
}

#[test]
fn column_header_is_repeated_on_continuation_pages() {
    let mut composer = PageComposer::new("f");
    composer.title("T");
    let groups = vec![TableGroup {
        title: "【G】".to_string(),
        rows: plain_rows(60),
    }];
    render_groups(&mut composer, &two_columns(), &groups);
    let pages = composer.finish();

    let pages_with_rows = pages
        .iter()
        .filter(|p| p.texts().iter().any(|t| t.starts_with('R')))
        .count();
    assert!(pages_with_rows >= 2);
    // One header per page that shows rows, none elsewhere.
    assert_eq!(count_text(&pages, "No"), pages_with_rows);
}

#[test]
fn rows_keep_their_sub_lines_on_one_page() {
    let rows: Vec<TableRow> = (0..40)
        .map(|i| TableRow {
            cells: vec![format!("R{i}")],
            sub_lines: vec![format!("R{i}-a"), format!("R{i}-b")],
        })
        .collect();
    let columns = vec![ColumnSpec::new("No", 30.0)];
    let mut composer = PageComposer::new("f");
    composer.title("T");
    render_groups(&mut composer, &columns, &[TableGroup { title: "【G】".to_string(), rows }]);
    let pages = composer.finish();

    assert!(pages.len() >= 2);
    for i in 0..40 {
        let row_page = page_with_text(&pages, &format!("R{i}")).unwrap();
        assert_eq!(page_with_text(&pages, &format!("R{i}-a")), Some(row_page));
        assert_eq!(page_with_text(&pages, &format!("R{i}-b")), Some(row_page));
    }
}

#[test]
fn cell_values_are_clipped_to_the_column_width() {
    let columns = vec![ColumnSpec::clipped("チーム名", 45.0, 15)];
    let long_name: String = "あ".repeat(20);
    let rows = vec![TableRow {
        cells: vec![long_name.clone()],
        sub_lines: Vec::new(),
    }];
    let mut composer = PageComposer::new("f");
    composer.title("T");
    render_groups(&mut composer, &columns, &[TableGroup { title: "【G】".to_string(), rows }]);
    let pages = composer.finish();

    assert_eq!(count_text(&pages, &"あ".repeat(15)), 1);
    assert_eq!(count_text(&pages, &long_name), 0);
    // Column titles are never clipped.
    assert_eq!(count_text(&pages, "チーム名"), 1);
}

#[test]
fn header_rule_is_drawn_under_column_titles() {
    let mut composer = PageComposer::new("f");
    composer.title("T");
    render_groups(
        &mut composer,
        &two_columns(),
        &[TableGroup { title: "【G】".to_string(), rows: plain_rows(1) }],
    );
    let pages = composer.finish();
    assert!(pages[0].ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
}

#[test]
fn no_groups_still_yields_a_cover_page() {
    let mut composer = PageComposer::new("フッター");
    composer.title("タイトル");
    render_groups(&mut composer, &two_columns(), &[]);
    let pages = composer.finish();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].texts(), vec!["タイトル", "フッター"]);
}

#[test]
fn groups_are_separated_and_titled() {
    let mut composer = PageComposer::new("f");
    composer.title("T");
    let groups = vec![
        TableGroup { title: "【第1会場】".to_string(), rows: plain_rows(2) },
        TableGroup { title: "【第2会場】".to_string(), rows: plain_rows(2) },
    ];
    render_groups(&mut composer, &two_columns(), &groups);
    let pages = composer.finish();

    assert_eq!(pages.len(), 1);
    assert_eq!(count_text(&pages, "【第1会場】"), 1);
    assert_eq!(count_text(&pages, "【第2会場】"), 1);
    // Each group carries its own column header.
    assert_eq!(count_text(&pages, "No"), 2);
}
