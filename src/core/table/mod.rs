//! Table layout engine
//!
//! Chooses between three table representations based on the grid shape:
//!
//! - **fixed** (`table` + `tabular`/`tabularx`) for up to
//!   [`FLOWING_ROW_THRESHOLD`] rows;
//! - **flowing** (`longtable`, page-breakable, header repeated per page)
//!   beyond that;
//! - **two-column split** (30-row `longtable` chunks laid out two abreast in
//!   `minipage`s) for very long, narrow tables - more than
//!   [`PERFORMANCE_ROW_THRESHOLD`] rows with at most
//!   [`SPLIT_MAX_COLUMNS`] columns.
//!
//! The three thresholds are deliberately independent tests; they overlap
//! (a 55-row, 5-column table warns and flows without splitting) and are kept
//! that way pending product-owner confirmation.
//!
//! Wide tables ([`CONDENSED_COLUMN_THRESHOLD`] columns or more) switch to
//! condensed mode: `\small`, tightened `\tabcolsep`, and - in fixed mode - a
//! stretch-to-width `tabularx` column spec. The stretch spec is not legal
//! inside `longtable`, so flowing and split tables always use left-aligned
//! columns.


use crate::ast::DocumentNode;
use crate::core::context::EmitContext;
use crate::core::visitor::{FloatItem, FloatKind, TableInfo, Visitor};
use crate::data::constants::SUMMARY_KEYWORDS;

/// Row count above which a table flows across pages.
pub const FLOWING_ROW_THRESHOLD: usize = 30;
/// Row count above which a performance diagnostic is recorded, and at which
/// narrow tables switch to the two-column split.
pub const PERFORMANCE_ROW_THRESHOLD: usize = 50;
/// Maximum column count eligible for the two-column split.
pub const SPLIT_MAX_COLUMNS: usize = 4;
/// Column count at which condensed mode kicks in.
pub const CONDENSED_COLUMN_THRESHOLD: usize = 6;
/// Body rows per chunk in the two-column split.
pub const SPLIT_CHUNK_ROWS: usize = 30;

/// Chunks laid side by side per line of page real estate.
const SPLIT_CHUNKS_PER_LINE: usize = 2;
/// Fixed minipage height; half a page minus margins.
const SPLIT_MINIPAGE_HEIGHT_MM: usize = 115;
/// Minipage width as a fraction of `\textwidth`.
const SPLIT_MINIPAGE_WIDTH: &str = "0.48";

/// Whether rendered first-cell text marks a summary row ("Total", "合計",
/// ...). Case-insensitive substring containment against the keyword set.
pub fn is_summary_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    SUMMARY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Left-aligned column spec (`"l l l"`).
fn left_column_spec(columns: usize) -> String {
    vec!["l"; columns].join(" ")
}

impl<'a> Visitor<'a> {
    pub(crate) fn visit_table(&mut self, table: &'a DocumentNode, ctx: &mut EmitContext) {
        let rows = table.children.len();
        if rows == 0 {
            // Invalid input; absorbed rather than raised.
            return;
        }
        let columns = table.children[0].children.len();

        let source = self.extract_node_source(table);
        let index = self.tables.len();
        self.tables.push(TableInfo {
            index,
            rows,
            cols: columns,
            source,
        });
        self.items_in_order.push(FloatItem {
            kind: FloatKind::Table,
            display_index: self.table_counter,
        });
        self.table_counter += 1;

        if rows > PERFORMANCE_ROW_THRESHOLD {
            self.message(
                format!(
                    "Large table detected ({} rows). Export may be slow or cause freezing.",
                    rows
                ),
                table,
            );
        }

        let condensed = columns >= CONDENSED_COLUMN_THRESHOLD;

        if rows > FLOWING_ROW_THRESHOLD {
            if rows > PERFORMANCE_ROW_THRESHOLD && columns <= SPLIT_MAX_COLUMNS {
                self.emit_split_table(table, columns, condensed, ctx);
            } else {
                self.emit_flowing_table(table, columns, condensed, ctx);
            }
        } else {
            self.emit_fixed_table(table, columns, condensed, ctx);
        }
    }

    /// A positioned float holding a `tabular` (or `tabularx` in condensed
    /// mode). Caption sits above the body.
    fn emit_fixed_table(
        &mut self,
        table: &'a DocumentNode,
        columns: usize,
        condensed: bool,
        ctx: &mut EmitContext,
    ) {
        ctx.emit(&format!(
            "\\begin{{table}}[{}]\n",
            self.settings.table_position
        ));
        ctx.emit("\\centering\n");

        if self.settings.generate_captions {
            ctx.emit("\\caption{\\sffamily Table}\n");
            self.label(table, ctx);
        }

        if condensed {
            self.emit_condensed_open(ctx);
            ctx.emit(&format!(
                "\\begin{{tabularx}}{{\\textwidth}}{{{}}}\n",
                "X".repeat(columns)
            ));
        } else {
            ctx.emit(&format!(
                "\\begin{{tabular}}{{{}}}\n",
                left_column_spec(columns)
            ));
        }

        ctx.emit("\\toprule\n");
        for (row_index, row) in table.children.iter().enumerate() {
            self.emit_table_row(row, row_index, ctx);
            ctx.emit("\\\\\n");
            if row_index == 0 {
                ctx.emit("\\midrule\n");
            }
        }
        ctx.emit("\\bottomrule\n");

        if condensed {
            ctx.emit("\\end{tabularx}\n");
            ctx.emit("}\n");
        } else {
            ctx.emit("\\end{tabular}\n");
        }
        ctx.emit("\\end{table}\n");
    }

    /// A page-breakable `longtable` repeating the header after the rule on
    /// every page. Caption appears once, right after the environment opens.
    fn emit_flowing_table(
        &mut self,
        table: &'a DocumentNode,
        columns: usize,
        condensed: bool,
        ctx: &mut EmitContext,
    ) {
        if condensed {
            self.emit_condensed_open(ctx);
        }

        ctx.emit(&format!(
            "\\begin{{longtable}}[c]{{{}}}\n",
            left_column_spec(columns)
        ));
        if self.settings.generate_captions {
            ctx.emit("\\caption{\\sffamily Table}\\\\\n");
            self.label(table, ctx);
        }
        ctx.emit("\\toprule\n");
        for (row_index, row) in table.children.iter().enumerate() {
            self.emit_table_row(row, row_index, ctx);
            ctx.emit("\\\\\n");
            if row_index == 0 {
                ctx.emit("\\midrule\n");
                ctx.emit("\\endhead\n");
            }
        }
        ctx.emit("\\bottomrule\n");
        ctx.emit("\\end{longtable}\n");

        if condensed {
            ctx.emit("}\n");
        }
    }

    /// Very long, narrow tables: body rows partitioned into 30-row chunks,
    /// each chunk a self-contained `longtable` repeating the header, laid
    /// out two per line inside fixed-height minipages. The whole construct
    /// starts on a fresh page; the caption is attached to the first chunk
    /// only.
    fn emit_split_table(
        &mut self,
        table: &'a DocumentNode,
        columns: usize,
        condensed: bool,
        ctx: &mut EmitContext,
    ) {
        ctx.emit("\\clearpage\n");
        if condensed {
            self.emit_condensed_open(ctx);
        }

        let rows = table.children.len();
        let header = &table.children[0];
        let mut current = 1;
        let mut chunk_counter = 0usize;

        while current < rows {
            if chunk_counter % SPLIT_CHUNKS_PER_LINE == 0 {
                ctx.emit("\\noindent\n");
            }
            let end = (current + SPLIT_CHUNK_ROWS).min(rows);

            ctx.emit(&format!(
                "\\begin{{minipage}}[t][{}mm][t]{{{}\\textwidth}}\n",
                SPLIT_MINIPAGE_HEIGHT_MM, SPLIT_MINIPAGE_WIDTH
            ));
            ctx.emit("\\setlength{\\parskip}{0pt}\n");
            ctx.emit("\\setlength{\\baselineskip}{10pt}\n");
            ctx.emit(&format!(
                "\\begin{{longtable}}[c]{{{}}}\n",
                left_column_spec(columns)
            ));

            if chunk_counter == 0 && self.settings.generate_captions {
                ctx.emit("\\caption{\\sffamily Table}\\\\\n");
                self.label(table, ctx);
            }

            ctx.emit("\\toprule\n");
            self.emit_table_row(header, 0, ctx);
            ctx.emit("\\\\\n");
            ctx.emit("\\midrule\n");
            ctx.emit("\\endhead\n");
            for (offset, row) in table.children[current..end].iter().enumerate() {
                self.emit_table_row(row, offset + 1, ctx);
                ctx.emit("\\\\\n");
            }
            ctx.emit("\\bottomrule\n");
            ctx.emit("\\end{longtable}\n");
            ctx.emit("\\end{minipage}\n");

            let last_in_line = (chunk_counter + 1) % SPLIT_CHUNKS_PER_LINE == 0;
            let last_chunk = end >= rows;
            if last_in_line && !last_chunk {
                ctx.emit("\\par\\vspace{1em}\n");
            } else if !last_in_line {
                ctx.emit("\\hfill\n");
            }

            current = end;
            chunk_counter += 1;
        }

        if condensed {
            ctx.emit("}\n");
        }
    }

    /// Condensed mode opener; closed with a bare `}` by the caller.
    fn emit_condensed_open(&mut self, ctx: &mut EmitContext) {
        ctx.emit("{\\small\n");
        ctx.emit("\\setlength{\\tabcolsep}{2pt}\n");
    }

    /// Emit one row's cells, preceded by `\hline` when the row is a summary
    /// row. The header (row 0) never receives a rule even when it matches.
    fn emit_table_row(&mut self, row: &'a DocumentNode, row_index: usize, ctx: &mut EmitContext) {
        if row_index > 0 {
            if let Some(first) = row.children.first() {
                // Isolated render for keyword detection only; the result is
                // discarded and the shared buffer is never touched.
                let text = self.render_isolated(&first.children);
                if is_summary_text(text.trim()) {
                    ctx.emit("\\hline\n");
                }
            }
        }
        self.visit_table_row(row, ctx);
    }

    /// Emit a row's cells joined by `&`.
    pub(crate) fn visit_table_row(&mut self, row: &'a DocumentNode, ctx: &mut EmitContext) {
        let cells = row.children.len();
        for (cell_index, cell) in row.children.iter().enumerate() {
            self.visit(cell, ctx);
            if cell_index < cells - 1 {
                ctx.emit("&");
            }
        }
    }

    /// Render a cell in isolation, then flatten it: literal newlines become
    /// single spaces, and hard line breaks become `\newline`, the only break
    /// command legal inside these table environments.
    pub(crate) fn visit_table_cell(&mut self, cell: &'a DocumentNode, ctx: &mut EmitContext) {
        let rendered = self.render_isolated(&cell.children);
        let content = rendered.replace('\n', " ").replace("\\\\", "\\newline");
        ctx.emit(&content);
    }
}
