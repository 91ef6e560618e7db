//! Conversions of a real TrueType font.

use std::path::PathBuf;

use sfont_converter::{
    backend::{FontBackend, TtfBackend},
    config::{Config, Layout},
    convert,
    error::ConvertError,
    run,
};

const DEJAVU_SANS_MONO: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");
const GOLDEN_A: &str = include_str!("fixtures/dejavu_a.txt");

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
}

fn convert_to_string(config: &Config) -> String {
    let backend = TtfBackend::parse(DEJAVU_SANS_MONO).unwrap();

    let mut out = Vec::new();
    convert(&backend, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn read_u16(data: &[u8], offset: usize) -> usize {
    usize::from(u16::from_be_bytes([data[offset], data[offset + 1]]))
}

fn read_u32(data: &[u8], offset: usize) -> usize {
    let bytes = data[offset..offset + 4].try_into().unwrap();
    usize::try_from(u32::from_be_bytes(bytes)).unwrap()
}

/// Returns the offset of the table `tag` inside `font`.
fn table_offset(font: &[u8], tag: &[u8; 4]) -> usize {
    (0..read_u16(font, 4))
        .map(|index| 12 + index * 16)
        .find(|record| &font[*record..*record + 4] == tag)
        .map(|record| read_u32(font, record + 8))
        .unwrap()
}

/// Returns a copy of `font` whose `glyf` record for glyph `index` ends after `len` bytes.
fn truncate_glyph(font: &[u8], index: usize, len: usize) -> Vec<u8> {
    let mut font = font.to_vec();
    let long_offsets = read_u16(&font, table_offset(&font, b"head") + 50) == 1;
    let loca = table_offset(&font, b"loca");

    if long_offsets {
        let start = read_u32(&font, loca + index * 4);
        let end = u32::try_from(start + len).unwrap().to_be_bytes();
        font[loca + (index + 1) * 4..loca + (index + 2) * 4].copy_from_slice(&end);
    } else {
        let start = read_u16(&font, loca + index * 2) * 2;
        let end = u16::try_from((start + len) / 2).unwrap().to_be_bytes();
        font[loca + (index + 1) * 2..loca + (index + 2) * 2].copy_from_slice(&end);
    }
    font
}

/// Returns the rows of the glyph block labelled `header`.
fn glyph_rows<'table>(table: &'table str, header: &str) -> Vec<&'table str> {
    table
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| line.starts_with("  0x"))
        .collect()
}

#[test]
fn printable_ascii_is_mapped() {
    let backend = TtfBackend::parse(DEJAVU_SANS_MONO).unwrap();

    for c in sfont_converter::PRINTABLE_ASCII {
        assert_ne!(backend.glyph_index(c), 0, "{c:?} is not mapped");
    }

    let metrics = backend.metrics(24);
    assert!(metrics.height > metrics.ascent);
    assert!(metrics.ascent > metrics.cap_height.unwrap_or(0));
    assert!(metrics.descent > 0);
}

#[test]
fn outlines_sit_above_the_baseline() {
    let backend = TtfBackend::parse(DEJAVU_SANS_MONO).unwrap();

    let index = backend.glyph_index('A');
    let segments = backend.load_outline(index, 24).unwrap();
    assert!(!segments.is_empty());
    assert!(segments.iter().flat_map(|s| s.points()).all(|p| p.y <= 0));
    assert!(segments.iter().flat_map(|s| s.points()).any(|p| p.y < -10 * 64));

    let space = backend.load_outline(backend.glyph_index(' '), 24).unwrap();
    assert!(space.is_empty());
}

#[test]
fn capital_a_is_drawn() {
    let table = convert_to_string(&Config::new("DejaVuSansMono.ttf"));

    let rows = glyph_rows(&table, "  // A 65");
    assert_eq!(rows.len(), 24);
    let set = rows.iter().filter(|row| row.contains('#')).count();
    assert!(set > 10, "only {set} rows of 'A' are set");
    assert!(rows[23].ends_with("// ................"));

    let space = glyph_rows(&table, "  //   32");
    assert_eq!(space.len(), 24);
    assert!(space.iter().all(|row| !row.contains('#')));
}

#[test]
fn capital_a_matches_golden() {
    let table = convert_to_string(&Config::new("DejaVuSansMono.ttf"));

    let mut block = vec!["  // A 65"];
    block.extend(glyph_rows(&table, "  // A 65"));
    assert_eq!(block, GOLDEN_A.lines().collect::<Vec<_>>());
}

#[test]
fn cap_height_is_measured_from_capital_h() {
    // The font's OS/2 table predates the cap height field.
    let backend = TtfBackend::parse(DEJAVU_SANS_MONO).unwrap();
    assert_eq!(backend.metrics(24).cap_height, Some(1120));

    // A baseline at row 18 in a 22 row cell, the same placement as the default layout.
    let mut config = Config::new("DejaVuSansMono.ttf");
    config.layout = Layout::Metrics {
        reduce_height: None,
    };
    let table = convert_to_string(&config);

    let rows = glyph_rows(&table, "  // A 65");
    let golden = GOLDEN_A.lines().skip(1).take(22).collect::<Vec<_>>();
    assert_eq!(rows, golden);
}

#[test]
fn truncated_glyph_aborts_without_output() {
    let backend = TtfBackend::parse(DEJAVU_SANS_MONO).unwrap();
    let index = usize::from(backend.glyph_index('A'));

    let font = truncate_glyph(DEJAVU_SANS_MONO, index, 30);
    let backend = TtfBackend::parse(&font).unwrap();
    assert!(backend.load_outline(backend.glyph_index('A'), 24).is_none());
    assert!(backend.load_outline(backend.glyph_index(' '), 24).is_some());

    let mut out = Vec::new();
    let err = convert(&backend, &Config::new("DejaVuSansMono.ttf"), &mut out).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::MalformedGlyph('A'))
    ));
    assert!(out.is_empty());
}

#[test]
fn full_table() {
    let table = convert_to_string(&Config::new("DejaVuSansMono.ttf"));

    let headers = table.lines().filter(|line| line.starts_with("  // ")).count();
    assert_eq!(headers, 95);
    let rows = table.lines().filter(|line| line.starts_with("  0x")).count();
    assert_eq!(rows, 95 * 24);
    assert!(table.contains("  2, /* Width */\n  24, /* Height */\n"));
}

#[test]
fn conversion_is_deterministic() {
    let mut config = Config::new("DejaVuSansMono.ttf");
    config.layout = Layout::Metrics {
        reduce_height: None,
    };

    assert_eq!(convert_to_string(&config), convert_to_string(&config));
}

#[test]
fn malformed_font() {
    let Err(err) = TtfBackend::parse(b"definitely not a font") else {
        panic!("garbage parsed as a font");
    };

    assert!(matches!(err, ConvertError::FontParse(_)));
}

#[test]
fn unreadable_font() {
    let config = Config::new(fixture_path().with_file_name("missing.ttf"));

    let err = run(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::FontRead { .. })
    ));
}
