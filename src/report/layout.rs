//! Paginating page layout for the report documents.
//!
//! The composer lays text onto A4 portrait pages in millimetre coordinates
//! (origin bottom-left, the PDF convention) and emits device-independent
//! draw operations. The PDF exporter replays them; tests inspect them
//! directly without decoding any PDF bytes.
//!
//! Pagination rule: a table row and its sub-lines are kept together. Before
//! each block the composer checks the remaining space and starts a new page
//! when the block does not fit, re-emitting the column header so
//! continuation pages stay readable. The footer line is stamped once per
//! page when the page is closed.

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

pub const TOP_MARGIN: f32 = 20.0;
pub const CONTENT_BOTTOM: f32 = 20.0;
pub const FOOTER_Y: f32 = 15.0;
pub const LEFT_X: f32 = 30.0;
pub const RULE_RIGHT_X: f32 = 190.0;

pub const TITLE_SIZE: f32 = 16.0;
pub const TITLE_ADVANCE: f32 = 15.0;
pub const SUBTITLE_SIZE: f32 = 10.0;
pub const SUBTITLE_ADVANCE: f32 = 6.0;
pub const HEADING_SIZE: f32 = 12.0;
pub const HEADING_ADVANCE: f32 = 8.0;
pub const TABLE_SIZE: f32 = 9.0;
pub const ROW_ADVANCE: f32 = 5.0;
pub const SUB_SIZE: f32 = 8.0;
pub const SUB_ADVANCE: f32 = 4.0;
pub const FOOTER_SIZE: f32 = 8.0;
pub const GROUP_GAP: f32 = 10.0;

/// One drawing instruction, in page millimetres.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text { x: f32, y: f32, size: f32, text: String },
    Rule { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// A finished page: draw operations in emission order.
#[derive(Clone, Debug, Default)]
pub struct ReportPage {
    pub ops: Vec<DrawOp>,
}

impl ReportPage {
    /// All text contents on the page, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rule { .. } => None,
            })
            .collect()
    }
}

/// A table column: header title, x position, and an optional clip width in
/// characters applied to cell values at draw time.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub x: f32,
    pub max_chars: Option<usize>,
}

impl ColumnSpec {
    pub fn new(title: &'static str, x: f32) -> Self {
        Self { title, x, max_chars: None }
    }

    pub fn clipped(title: &'static str, x: f32, max_chars: usize) -> Self {
        Self { title, x, max_chars: Some(max_chars) }
    }
}

/// One table row: cell values matching the column specs, plus indented
/// sub-lines printed under the row (goal details).
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub sub_lines: Vec<String>,
}

/// A titled run of rows sharing one column header.
#[derive(Clone, Debug)]
pub struct TableGroup {
    pub title: String,
    pub rows: Vec<TableRow>,
}

fn clip(text: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(n) => text.chars().take(n).collect(),
        None => text.to_string(),
    }
}

pub struct PageComposer {
    footer_text: String,
    pages: Vec<ReportPage>,
    current: Vec<DrawOp>,
    y: f32,
}

impl PageComposer {
    pub fn new(footer_text: impl Into<String>) -> Self {
        Self {
            footer_text: footer_text.into(),
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - TOP_MARGIN,
        }
    }

    fn put_text(&mut self, x: f32, size: f32, text: &str) {
        self.current.push(DrawOp::Text {
            x,
            y: self.y,
            size,
            text: text.to_string(),
        });
    }

    fn close_page(&mut self) {
        let mut ops = std::mem::take(&mut self.current);
        ops.push(DrawOp::Text {
            x: LEFT_X,
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            text: self.footer_text.clone(),
        });
        self.pages.push(ReportPage { ops });
        self.y = PAGE_HEIGHT - TOP_MARGIN;
    }

    /// Makes room for a block of the given height. Returns true when that
    /// meant starting a new page. Blocks taller than a whole page are
    /// placed at the top of a fresh page and allowed to overrun.
    pub fn ensure(&mut self, needed: f32) -> bool {
        let needed = needed.min(PAGE_HEIGHT - TOP_MARGIN - CONTENT_BOTTOM);
        if self.y - needed < CONTENT_BOTTOM {
            self.close_page();
            true
        } else {
            false
        }
    }

    pub fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    pub fn title(&mut self, text: &str) {
        self.put_text(LEFT_X, TITLE_SIZE, text);
        self.y -= TITLE_ADVANCE;
    }

    pub fn subtitle(&mut self, text: &str) {
        self.put_text(LEFT_X, SUBTITLE_SIZE, text);
        self.y -= SUBTITLE_ADVANCE;
    }

    pub fn heading(&mut self, text: &str) {
        self.put_text(LEFT_X, HEADING_SIZE, text);
        self.y -= HEADING_ADVANCE;
    }

    /// Column titles plus the rule under them.
    pub fn columns_header(&mut self, columns: &[ColumnSpec]) {
        for column in columns {
            self.put_text(column.x, TABLE_SIZE, column.title);
        }
        let rule_y = self.y - 3.0;
        self.current.push(DrawOp::Rule {
            x1: LEFT_X,
            y1: rule_y,
            x2: RULE_RIGHT_X,
            y2: rule_y,
        });
        self.y -= ROW_ADVANCE;
    }

    /// Cell values at their column positions, clipped per column.
    pub fn row(&mut self, columns: &[ColumnSpec], row: &TableRow) {
        for (column, cell) in columns.iter().zip(&row.cells) {
            let value = clip(cell, column.max_chars);
            self.put_text(column.x, TABLE_SIZE, &value);
        }
        self.y -= ROW_ADVANCE;
    }

    pub fn sub_line(&mut self, text: &str) {
        self.put_text(LEFT_X + 10.0, SUB_SIZE, text);
        self.y -= SUB_ADVANCE;
    }

    /// Closes the page in progress and returns all pages. Always yields at
    /// least one page.
    pub fn finish(mut self) -> Vec<ReportPage> {
        self.close_page();
        self.pages
    }
}

/// Height of a row block: the row itself plus its sub-lines.
fn block_height(row: &TableRow) -> f32 {
    ROW_ADVANCE + row.sub_lines.len() as f32 * SUB_ADVANCE
}

/// Lays out titled table groups under whatever the composer already holds.
/// Each group gets its heading and column header; rows keep their sub-lines
/// on the same page, and the column header is repeated after a mid-group
/// page break.
pub fn render_groups(composer: &mut PageComposer, columns: &[ColumnSpec], groups: &[TableGroup]) {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            composer.gap(GROUP_GAP);
        }
        // Never leave a heading orphaned at the bottom of a page.
        composer.ensure(HEADING_ADVANCE + 2.0 * ROW_ADVANCE);
        composer.heading(&group.title);
        composer.columns_header(columns);
        for row in &group.rows {
            if composer.ensure(block_height(row)) {
                composer.columns_header(columns);
            }
            composer.row(columns, row);
            for line in &row.sub_lines {
                composer.sub_line(line);
            }
        }
    }
}
