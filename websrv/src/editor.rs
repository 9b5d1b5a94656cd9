// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTML form for editing the metadata fields of a tone

use html_escape::{encode_double_quoted_attribute, encode_safe, encode_text};

use tones_core::{
    Tone,
    schema::{FieldDataType, FieldDeclaration},
};
use tones_repo::record::RecordHeader;

const fn input_attributes(data_type: FieldDataType) -> &'static str {
    match data_type {
        FieldDataType::Integer => r#"type="number" step="1""#,
        FieldDataType::String => r#"type="text""#,
    }
}

fn render_field(field: &FieldDeclaration, value: &str) -> String {
    let key = encode_double_quoted_attribute(&field.key);
    let label = encode_text(&field.label);
    let value = encode_safe(value);
    let input_attributes = input_attributes(field.data_type);
    format!(
        r#"<p>
<label for="{key}">{label}</label>
<input {input_attributes} name="{key}" id="{key}" value="{value}">
</p>
"#
    )
}

/// Render the editor page of a tone
///
/// Every declared field is pre-filled with its current value
/// or left empty if absent.
pub(crate) fn render_form<'a>(
    action_path: &str,
    header: &RecordHeader,
    tone: &Tone,
    fields: impl IntoIterator<Item = &'a FieldDeclaration>,
) -> String {
    let title = encode_text(&tone.title);
    let action_path = encode_double_quoted_attribute(action_path);
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Edit Tone: {title}</title>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="{action_path}">
"#
    );
    for field in fields {
        let value = tone.field_value(&field.key).unwrap_or_default();
        html.push_str(&render_field(field, value));
    }
    html.push_str(&format!(
        r#"<p><button type="submit">Save</button></p>
</form>
<p><small>Last modified: {updated_at}</small></p>
</body>
</html>
"#,
        updated_at = header.updated_at
    ));
    html
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use tones_core::{
        schema::Registry,
        tone::{CONTENT_TYPE, register_schema},
    };
    use tones_repo::record::RecordId;

    use super::*;

    fn header() -> RecordHeader {
        RecordHeader {
            id: RecordId::new(7),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        register_schema(&mut registry).unwrap();
        registry
    }

    #[test]
    fn render_inputs_by_data_type() {
        let registry = registry();
        let tone = Tone {
            title: "A4".to_owned(),
            frequency: Some("440".to_owned()),
            file: Some("A4_440Hz".to_owned()),
        };
        let html = render_form(
            "/editor/tones/7",
            &header(),
            &tone,
            registry.fields_of(CONTENT_TYPE),
        );
        assert!(html.contains(r#"<label for="tone_freq">Tone Freq</label>"#));
        assert!(html.contains(
            r#"<input type="number" step="1" name="tone_freq" id="tone_freq" value="440">"#
        ));
        assert!(html.contains(r#"<label for="tone_file">Tone File</label>"#));
        assert!(
            html.contains(r#"<input type="text" name="tone_file" id="tone_file" value="A4_440Hz">"#)
        );
        assert!(html.contains(r#"action="/editor/tones/7""#));
    }

    #[test]
    fn render_absent_values_empty() {
        let registry = registry();
        let tone = Tone {
            title: "Untitled".to_owned(),
            ..Default::default()
        };
        let html = render_form(
            "/editor/tones/7",
            &header(),
            &tone,
            registry.fields_of(CONTENT_TYPE),
        );
        assert!(html.contains(r#"name="tone_freq" id="tone_freq" value="">"#));
        assert!(html.contains(r#"name="tone_file" id="tone_file" value="">"#));
    }

    #[test]
    fn escape_values() {
        let registry = registry();
        let tone = Tone {
            title: "<script>alert(1)</script>".to_owned(),
            frequency: None,
            file: Some(r#""><script>"#.to_owned()),
        };
        let html = render_form(
            "/editor/tones/7",
            &header(),
            &tone,
            registry.fields_of(CONTENT_TYPE),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script"));
        assert!(html.contains(r#"id="tone_file" value="&quot;"#));
    }

    #[test]
    fn render_complete_page_with_fields_in_order() {
        let registry = registry();
        let tone = Tone {
            title: "A4".to_owned(),
            frequency: Some("440".to_owned()),
            file: Some("A4_440Hz".to_owned()),
        };
        let html = render_form(
            "/editor/tones/7",
            &header(),
            &tone,
            registry.fields_of(CONTENT_TYPE),
        );
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.ends_with("</body>\n</html>\n"));
        let form_start = html.find("<form ").unwrap();
        let freq = html.find(r#"id="tone_freq""#).unwrap();
        let file = html.find(r#"id="tone_file""#).unwrap();
        let submit = html.find(r#"<button type="submit">"#).unwrap();
        let form_end = html.find("</form>").unwrap();
        assert!(form_start < freq);
        assert!(freq < file);
        assert!(file < submit);
        assert!(submit < form_end);
        assert!(html.contains("Last modified: 1970-01-01T00:00:00Z"));
    }
}
