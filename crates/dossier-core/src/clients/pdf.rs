//! PDF form personalization for the dossier template

use crate::config::DocumentConfig;
use crate::error::{DossierError, Result};
use crate::paths;
use crate::types::{PersonalizationOutcome, PersonalizedDocument};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use std::fs;
use std::path::Path;

const OUTPUT_FILE_PREFIX: &str = "Document";
const MAX_FIELD_DEPTH: usize = 32;

/// Outcome of writing a value into a form field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFill {
    Filled,
    /// The field does not exist; `available` lists the fields that do
    Missing { available: Vec<String> },
}

#[derive(Debug, Clone)]
struct FormFieldEntry {
    id: ObjectId,
    full_name: String,
    partial_name: String,
}

pub struct PdfPersonalizer {
    field_name: String,
    downloads_base_path: String,
    brand: String,
}

impl PdfPersonalizer {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            field_name: config.field_name.clone(),
            downloads_base_path: config.downloads_base_path.clone(),
            brand: config.brand.clone(),
        }
    }

    pub fn output_file_name(&self, full_name: &str) -> String {
        output_file_name(&self.brand, full_name)
    }

    /// Produce a personalized copy of the template. Never fails: errors are
    /// reported in the outcome with their cause.
    pub fn personalize(&self, full_name: &str, output_dir: &Path, template_path: &Path) -> PersonalizationOutcome {
        match self.render(full_name, output_dir, template_path) {
            Ok((document, warning)) => {
                log::info!(
                    "Custom PDF saved: {} ({} pages)",
                    document.path.display(),
                    document.page_count
                );
                PersonalizationOutcome::completed(&document, warning)
            }
            Err(e) => {
                log::error!("Error customizing PDF for {}: {}", full_name, e);
                PersonalizationOutcome::failed(e.to_string())
            }
        }
    }

    /// Fill the template and write it to `output_dir`, returning the written
    /// document and a warning when the form field was absent.
    pub fn render(
        &self,
        full_name: &str,
        output_dir: &Path,
        template_path: &Path,
    ) -> Result<(PersonalizedDocument, Option<String>)> {
        fs::create_dir_all(output_dir).map_err(|e| DossierError::DocumentIo(
            format!("Cannot create output directory {}: {}", output_dir.display(), e)
        ))?;

        // The template file is only read; the loaded document is our writable copy
        let mut document = Document::load(template_path).map_err(|e| DossierError::DocumentIo(
            format!("Cannot read template {}: {}", template_path.display(), e)
        ))?;

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(DossierError::DocumentIo(
                format!("Template {} has no pages", template_path.display())
            ));
        }

        let warning = match fill_text_field(&mut document, &self.field_name, full_name)? {
            FieldFill::Filled => None,
            FieldFill::Missing { available } => {
                let message = format!(
                    "Field '{}' not found in PDF. Available fields: {:?}",
                    self.field_name, available
                );
                log::warn!("{}", message);
                Some(message)
            }
        };

        let file_name = self.output_file_name(full_name);
        let path = output_dir.join(&file_name);

        document.save(&path).map_err(|e| DossierError::DocumentIo(
            format!("Cannot write {}: {}", path.display(), e)
        ))?;

        let delivery_url = paths::delivery_url(&self.downloads_base_path, &file_name);

        Ok((
            PersonalizedDocument {
                path,
                file_name,
                delivery_url,
                page_count,
                field_filled: warning.is_none(),
            },
            warning,
        ))
    }
}

/// Filesystem-safe form of a name: anything but alphanumerics, space, hyphen
/// and underscore becomes `_`, then spaces become `_`.
pub fn sanitize_file_name(full_name: &str) -> String {
    full_name
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') { c } else { '_' })
        .collect::<String>()
        .replace(' ', "_")
}

/// Deterministic output file name for a lead
pub fn output_file_name(brand: &str, full_name: &str) -> String {
    format!("{}_{}_{}.pdf", OUTPUT_FILE_PREFIX, brand, sanitize_file_name(full_name))
}

/// Set the value of a text field, matching the fully-qualified name first
/// and the terminal name second.
pub fn fill_text_field(document: &mut Document, field_name: &str, value: &str) -> Result<FieldFill> {
    let fields = collect_form_fields(document)?;
    let targets = matching_fields(&fields, field_name);

    if targets.is_empty() {
        return Ok(FieldFill::Missing {
            available: fields.into_iter().map(|f| f.full_name).collect(),
        });
    }

    for id in targets {
        let field = document.get_dictionary_mut(id)?;
        field.set("V", encode_text_string(value));
        // Stale appearance streams would keep showing the old value
        field.remove(b"AP");

        let kids = document.get_dictionary(id)?.get(b"Kids").ok();
        let widget_ids = reference_array(document, kids);
        for widget_id in widget_ids {
            if let Ok(widget) = document.get_dictionary_mut(widget_id) {
                if !widget.has(b"T") {
                    widget.remove(b"AP");
                }
            }
        }
    }

    set_need_appearances(document)?;
    Ok(FieldFill::Filled)
}

/// Current value of a text field, if the field exists and has one
pub fn text_field_value(document: &Document, field_name: &str) -> Result<Option<String>> {
    let fields = collect_form_fields(document)?;

    for id in matching_fields(&fields, field_name) {
        let field = document.get_dictionary(id)?;
        if let Ok(bytes) = field.get(b"V").and_then(Object::as_str) {
            return Ok(Some(decode_text_string(bytes)));
        }
    }

    Ok(None)
}

/// Fully-qualified names of every named form field
pub fn form_field_names(document: &Document) -> Result<Vec<String>> {
    Ok(collect_form_fields(document)?.into_iter().map(|f| f.full_name).collect())
}

fn matching_fields(fields: &[FormFieldEntry], field_name: &str) -> Vec<ObjectId> {
    let exact: Vec<ObjectId> = fields.iter()
        .filter(|f| f.full_name == field_name)
        .map(|f| f.id)
        .collect();

    if !exact.is_empty() {
        return exact;
    }

    fields.iter()
        .filter(|f| f.partial_name == field_name)
        .map(|f| f.id)
        .collect()
}

fn catalog_id(document: &Document) -> Result<ObjectId> {
    Ok(document.trailer.get(b"Root")?.as_reference()?)
}

fn acroform(document: &Document) -> Result<Option<&Dictionary>> {
    let catalog = document.get_dictionary(catalog_id(document)?)?;

    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok(Some(document.get_dictionary(*id)?)),
        Ok(Object::Dictionary(dict)) => Ok(Some(dict)),
        _ => Ok(None),
    }
}

fn collect_form_fields(document: &Document) -> Result<Vec<FormFieldEntry>> {
    let Some(acroform) = acroform(document)? else {
        return Ok(Vec::new());
    };

    let roots = reference_array(document, acroform.get(b"Fields").ok());
    let mut fields = Vec::new();
    walk_fields(document, &roots, None, 0, &mut fields)?;
    Ok(fields)
}

fn walk_fields(
    document: &Document,
    ids: &[ObjectId],
    parent: Option<&str>,
    depth: usize,
    out: &mut Vec<FormFieldEntry>,
) -> Result<()> {
    if depth > MAX_FIELD_DEPTH {
        return Err(DossierError::DocumentIo("Form field tree is too deep".to_string()));
    }

    for &id in ids {
        let field = document.get_dictionary(id)?;
        let partial = field.get(b"T").and_then(Object::as_str).ok().map(decode_text_string);

        // Widgets without a T entry share their parent's name
        let full_name = match (parent, &partial) {
            (Some(parent), Some(partial)) => Some(format!("{}.{}", parent, partial)),
            (None, Some(partial)) => Some(partial.clone()),
            (parent, None) => parent.map(str::to_string),
        };

        if let (Some(full_name), Some(partial_name)) = (&full_name, &partial) {
            out.push(FormFieldEntry {
                id,
                full_name: full_name.clone(),
                partial_name: partial_name.clone(),
            });
        }

        let kids = reference_array(document, field.get(b"Kids").ok());
        if !kids.is_empty() {
            walk_fields(document, &kids, full_name.as_deref(), depth + 1, out)?;
        }
    }

    Ok(())
}

/// Object references held in an array, which may itself be stored indirectly
fn reference_array(document: &Document, object: Option<&Object>) -> Vec<ObjectId> {
    let array = match object {
        Some(Object::Reference(id)) => document.get_object(*id).ok(),
        other => other,
    };

    array
        .and_then(|o| o.as_array().ok())
        .map(|items| items.iter().filter_map(|item| item.as_reference().ok()).collect())
        .unwrap_or_default()
}

fn set_need_appearances(document: &mut Document) -> Result<()> {
    let root_id = catalog_id(document)?;
    let acroform_id = document.get_dictionary(root_id)?
        .get(b"AcroForm")
        .ok()
        .and_then(|o| o.as_reference().ok());

    match acroform_id {
        Some(id) => {
            document.get_dictionary_mut(id)?.set("NeedAppearances", true);
        }
        None => {
            if let Ok(Object::Dictionary(acroform)) = document.get_dictionary_mut(root_id)?.get_mut(b"AcroForm") {
                acroform.set("NeedAppearances", true);
            }
        }
    }

    Ok(())
}

/// PDF text string: literal for ASCII, UTF-16BE with byte order mark otherwise
fn encode_text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}
