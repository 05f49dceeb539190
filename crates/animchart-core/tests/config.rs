// File: crates/animchart-core/tests/config.rs
// Purpose: Loading chart configs from JSON, lenient option parsing and validation errors.

use animchart_core::format::{format_number, tick_label};
use animchart_core::{
    BarStyle, ChartConfig, ChartKind, Dimension, LabelOrientation, LineStyle, Rgba, TitleAlignment, TooltipPattern,
};

fn parse(json: &str) -> ChartConfig {
    serde_json::from_str(json).expect("config json")
}

#[test]
fn loads_a_full_config() {
    let config = parse(
        r##"{
            "type": "stackedbar",
            "style": "Cylinder",
            "data": [[1, 2], [3, 4]],
            "labels": ["Q1", "Q2"],
            "labelOrientation": "halfdiagonal",
            "color": ["#f00", "rgb(0, 128, 0)"],
            "legend": ["North", "South"],
            "alpha": 0.5,
            "showGridX": false,
            "colorXaxis": "#336699",
            "tickCount": 4,
            "title": { "text": "Sales", "alignment": "left", "font": { "weight": "bold", "size": "16", "family": "serif" } },
            "tooltipPattern": { "decimals": 1, "decimalSeparator": ",", "thousandSeparator": "." }
        }"##,
    );
    assert_eq!(config.kind, ChartKind::StackedBar);
    assert_eq!(config.bar_style(), BarStyle::Cylinder);
    assert_eq!(config.label_orientation, LabelOrientation::HalfDiagonal);
    assert_eq!(config.color.as_deref(), Some(&[Rgba::rgb(255, 0, 0), Rgba::rgb(0, 128, 0)][..]));
    assert_eq!(config.color_x_axis, Rgba::rgb(0x33, 0x66, 0x99));
    assert!(!config.show_grid_x);
    assert!(config.show_grid_y);
    assert_eq!(config.tick_count, 4);

    let title = config.title.as_ref().expect("title");
    assert_eq!(title.text, "Sales");
    assert_eq!(title.alignment, TitleAlignment::Left);
    assert_eq!(title.font.size, 16.0);
    assert_eq!(title.font.family, "serif");

    assert_eq!(config.tooltip_pattern.as_ref().map(|p| p.decimals), Some(1));
    assert!(config.validate().is_ok());
}

#[test]
fn missing_fields_take_defaults() {
    let config = parse(r#"{ "data": [[5, 6, 7]] }"#);
    assert_eq!(config.kind, ChartKind::Line);
    assert_eq!(config.line_style(), LineStyle::Normal);
    assert_eq!(config.alpha, 0.8);
    assert_eq!(config.tick_count, 5);
    assert_eq!(config.background, Rgba::WHITE);
    assert_eq!(config.message_template(), "#val");
    assert!(config.validate().is_ok());
}

#[test]
fn unknown_names_fall_back() {
    let config = parse(r#"{ "type": "radar", "style": "sparkly", "data": [[1]] }"#);
    assert_eq!(config.kind, ChartKind::Line);
    assert_eq!(config.bar_style(), BarStyle::Normal);
    assert_eq!(config.line_style(), LineStyle::Normal);
    assert_eq!(parse(r#"{ "style": "BowDot" }"#).line_style(), LineStyle::BowDot);
}

#[test]
fn bad_colors_fail_to_load() {
    let err = serde_json::from_str::<ChartConfig>(r##"{ "color": ["#zzz"] }"##);
    assert!(err.is_err());
}

#[test]
fn font_size_accepts_numbers_and_pixel_strings() {
    let a = parse(r#"{ "xData": { "font": { "size": 9 } } }"#);
    let b = parse(r#"{ "xData": { "font": { "size": "9px" } } }"#);
    assert_eq!(a.x_label_font().size, 9.0);
    assert_eq!(a.x_label_font(), b.x_label_font());
    assert_eq!(a.x_label_font().weight, "bold");
}

#[test]
fn validation_names_the_offending_field() {
    let cases = [
        (ChartConfig::new(ChartKind::Bar, vec![]), "data"),
        (ChartConfig::new(ChartKind::Bar, vec![vec![]]), "data"),
        (ChartConfig::new(ChartKind::Bar, vec![vec![1.0, f64::NAN]]), "data"),
        (ChartConfig::new(ChartKind::Bar, vec![vec![1.0, 2.0]]).with_labels(["only one"]), "labels"),
        (ChartConfig { tick_count: 1, ..ChartConfig::new(ChartKind::Bar, vec![vec![1.0]]) }, "tickCount"),
        (ChartConfig { alpha: 1.5, ..ChartConfig::new(ChartKind::Line, vec![vec![1.0]]) }, "alpha"),
        (ChartConfig::new(ChartKind::Pie, vec![vec![1.0, -2.0]]), "data"),
        (
            ChartConfig { line_data: Some(vec![vec![1.0]]), ..ChartConfig::new(ChartKind::Bar, vec![vec![1.0, 2.0]]) },
            "lineData",
        ),
        (
            ChartConfig { color: Some(vec![Rgba::BLACK]), ..ChartConfig::new(ChartKind::Bar, vec![vec![1.0], vec![2.0]]) },
            "color",
        ),
    ];
    for (config, field) in cases {
        let err = config.validate().expect_err("should be rejected");
        assert_eq!(err.field, field, "{err}");
    }
}

#[test]
fn negative_values_are_fine_outside_pie() {
    assert!(ChartConfig::new(ChartKind::Bar, vec![vec![-3.0, 2.0]]).validate().is_ok());
    assert!(ChartConfig::new(ChartKind::Area, vec![vec![-3.0, 2.0]]).validate().is_ok());
}

#[test]
fn default_messages_depend_on_kind() {
    assert_eq!(ChartConfig::new(ChartKind::HStackedBar, vec![vec![1.0]]).message_template(), "#val / #total");
    assert_eq!(ChartConfig::new(ChartKind::Pie, vec![vec![1.0]]).message_template(), "#val / #total<br>#percent% of 100%");
    let mut custom = ChartConfig::new(ChartKind::Pie, vec![vec![1.0]]);
    custom.message = Some("#val units".into());
    assert_eq!(custom.message_template(), "#val units");
}

#[test]
fn colors_are_extended_to_the_series_count() {
    let mut config = ChartConfig::new(ChartKind::Bar, vec![vec![1.0]; 3]);
    config.color = Some(vec![Rgba::rgb(1, 2, 3)]);
    let colors = config.series_colors();
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[0], Rgba::rgb(1, 2, 3));
    assert_ne!(colors[1], colors[2]);

    // pie colors each slice
    let pie = ChartConfig::new(ChartKind::Pie, vec![vec![1.0, 2.0, 3.0, 4.0]]);
    assert_eq!(pie.series_colors().len(), 4);
}

#[test]
fn dimensions_parse_pixels_and_percentages() {
    assert_eq!("50%".parse::<Dimension>().ok(), Some(Dimension::Percent(50.0)));
    assert_eq!("300px".parse::<Dimension>().ok(), Some(Dimension::Pixels(300.0)));
    assert_eq!(" 120 ".parse::<Dimension>().ok(), Some(Dimension::Pixels(120.0)));
    assert!("wide".parse::<Dimension>().is_err());
    assert_eq!(serde_json::from_str::<Dimension>("640").ok(), Some(Dimension::Pixels(640.0)));
    assert_eq!(Dimension::Percent(25.0).resolve(800.0), 200.0);
}

#[test]
fn number_patterns_group_thousands() {
    assert_eq!(format_number(1234567.891, 2, ".", ","), "1,234,567.89");
    assert_eq!(format_number(-1234.6, 0, ",", " "), "-1 235");
    assert_eq!(format_number(999.0, 1, ",", "."), "999,0");
    assert_eq!(format_number(12.0, 0, ".", ","), "12");
    assert_eq!(format_number(1234567.0, 0, ".", ""), "1234567");
    assert_eq!(format_number(9876543.21, 1, ",", "'"), "9'876'543,2");
}

#[test]
fn tick_labels_round_to_the_pattern() {
    assert_eq!(tick_label(6.0, None), "6");
    assert_eq!(tick_label(0.125, None), "0.13");
    let pattern = TooltipPattern { decimals: 0, ..TooltipPattern::default() };
    assert_eq!(tick_label(2.5, Some(&pattern)), "3");
}
