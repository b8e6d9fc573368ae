use d2_tbl::StringTable;
use d2_txt::error::Result;
use d2_txt::{Separator, TextTableReader, TextTableWriter, TextWriterOptions};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn sample() -> StringTable {
    let mut table = StringTable::default();
    table.push("strhelp1", "Help");
    table.push("strpanel2", "Press \u{FF}c4ESC\u{FF}c0 to exit");
    table.push("strlore3", "line one\nline two");
    table.push("strempty", "");
    table
}

#[traced_test]
#[test]
fn text_survives_a_round_trip() -> Result<()> {
    for wrap_strings in [true, false] {
        let buf = TextTableWriter::new(
            Vec::new(),
            TextWriterOptions::builder().wrap_strings(wrap_strings).build(),
        )
        .write_table(&sample())?;

        let reader = TextTableReader::new(buf.as_slice(), false)?;
        assert_eq!(reader.table(), &sample());
    }

    Ok(())
}

#[traced_test]
#[test]
fn csv_survives_a_round_trip() -> Result<()> {
    for separator in [Separator::Comma, Separator::Semicolon] {
        let buf = TextTableWriter::new(
            Vec::new(),
            TextWriterOptions::builder().separator(separator).build(),
        )
        .write_table(&sample())?;

        let reader = TextTableReader::new(buf.as_slice(), true)?;
        assert_eq!(reader.table(), &sample());
    }

    Ok(())
}
