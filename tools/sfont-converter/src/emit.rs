//! Emission of a packed [`GlyphTable`] as a C `sFONT` translation unit.

use std::{
    io::{self, Write},
    ops::RangeInclusive,
};

use font::glyph::{GlyphRow, GlyphTable};

/// The name of the emitted `sFONT` variable. The table is emitted as `<TABLE_NAME>_Table`.
pub const TABLE_NAME: &str = "FontCustom";

/// Writes `table` as a C translation unit declaring a `PROGMEM` byte table and its `sFONT`
/// descriptor.
///
/// Glyphs are labelled with the characters of `codepoints` in order. `source` is recorded in a
/// comment above the descriptor.
///
/// # Errors
///
/// Returns any error produced while writing to `writer`.
pub fn emit_table<W: Write>(
    mut writer: W,
    table: &GlyphTable<'_>,
    codepoints: RangeInclusive<char>,
    source: &str,
) -> io::Result<()> {
    write_header(&mut writer)?;

    for (c, glyph) in codepoints.zip(table.glyphs()) {
        writeln!(writer, "  // {c} {}", u32::from(c))?;
        for row in glyph {
            write_row(&mut writer, row)?;
        }
    }

    write!(writer, "}};")?;
    write!(writer, "\n\n/* Based on font {source} */\n")?;
    writeln!(writer, "sFONT {TABLE_NAME} = {{")?;
    writeln!(writer, "  {TABLE_NAME}_Table,")?;
    writeln!(writer, "  {}, /* Width */", table.row_byte_count())?;
    writeln!(writer, "  {}, /* Height */", table.height())?;
    writeln!(writer, "}};")?;

    Ok(())
}

/// Writes the includes and the opening of the table array.
fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "#include \"fonts.h\"")?;
    writeln!(writer, "#if defined(__AVR__) || defined(ARDUINO_ARCH_SAMD)")?;
    writeln!(writer, "#include <avr/pgmspace.h>")?;
    writeln!(writer, "#elif defined(ESP8266) || defined(ESP32)")?;
    writeln!(writer, "#include <pgmspace.h>")?;
    writeln!(writer, "#endif")?;
    writeln!(writer)?;
    writeln!(writer, "const uint8_t {TABLE_NAME}_Table [] PROGMEM =")?;
    writeln!(writer, "{{")?;
    writeln!(writer)
}

/// Writes the bytes of `row` followed by a comment drawing its pixels.
fn write_row<W: Write>(writer: &mut W, row: GlyphRow<'_>) -> io::Result<()> {
    write!(writer, "  ")?;
    for byte in row.bytes() {
        write!(writer, "0x{byte:02X}, ")?;
    }

    let pixels = row
        .into_iter()
        .map(|set| if set { '#' } else { '.' })
        .collect::<String>();
    writeln!(writer, " // {pixels}")
}

#[cfg(test)]
mod test {
    use font::glyph::GlyphTable;

    use super::emit_table;

    #[test]
    fn emits_glyph_blocks() {
        let table = GlyphTable::new(&[0xF0, 0x81, 0x00, 0xFF], 16, 1);

        let mut out = Vec::new();
        emit_table(&mut out, &table, 'A'..='B', "fonts/test.ttf").unwrap();
        let out = String::from_utf8(out).unwrap();

        let expected = "\
#include \"fonts.h\"
#if defined(__AVR__) || defined(ARDUINO_ARCH_SAMD)
#include <avr/pgmspace.h>
#elif defined(ESP8266) || defined(ESP32)
#include <pgmspace.h>
#endif

const uint8_t FontCustom_Table [] PROGMEM =
{

  // A 65
  0xF0, 0x81,  // ####....#......#
  // B 66
  0x00, 0xFF,  // ........########
};

/* Based on font fonts/test.ttf */
sFONT FontCustom = {
  FontCustom_Table,
  2, /* Width */
  1, /* Height */
};
";
        assert_eq!(out, expected);
    }

    #[test]
    fn padding_bits_are_not_drawn() {
        let table = GlyphTable::new(&[0xFF, 0xC0], 10, 1);

        let mut out = Vec::new();
        emit_table(&mut out, &table, ' '..=' ', "x").unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("  //   32\n"));
        assert!(out.contains("  0xFF, 0xC0,  // ##########\n"));
    }
}
