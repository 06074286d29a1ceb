//! Test fixtures: small dossier templates built with lopdf

use lopdf::{dictionary, Document, Object, ObjectId};
use std::path::Path;

pub const FIELD_NAME: &str = "nombre_personalizacion_lead";

fn rect(values: [i64; 4]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Integer(v)).collect())
}

/// How the personalization field is laid out in the template
#[allow(dead_code)]
pub enum TemplateField<'a> {
    None,
    /// A single field/widget with the given name
    Flat(&'a str),
    /// A parent field `parent` with a named child field
    Nested { parent: &'a str, child: &'a str },
    /// Like `Nested`, but `/Fields` and the parent's `/Kids` are indirect arrays
    IndirectArrays { parent: &'a str, child: &'a str },
}

/// Write a template whose pages have the given widths, in order
pub fn write_template(path: &Path, page_widths: &[i64], field: TemplateField) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    let mut page_ids: Vec<ObjectId> = Vec::new();
    for &width in page_widths {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => rect([0, 0, width, 842]),
        });
        kids.push(page_id.into());
        page_ids.push(page_id);
    }

    doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_widths.len() as i64,
    }));

    let first_page = page_ids[0];
    let root_fields: Vec<Object> = match field {
        TemplateField::None => Vec::new(),
        TemplateField::Flat(name) => {
            let widget_id = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(name),
                "Rect" => rect([100, 700, 400, 720]),
                "P" => first_page,
            });
            attach_annotation(&mut doc, first_page, widget_id);
            vec![widget_id.into()]
        }
        TemplateField::Nested { parent, child } => {
            let parent_id = doc.new_object_id();
            let child_id = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(child),
                "Parent" => parent_id,
                "Rect" => rect([100, 700, 400, 720]),
                "P" => first_page,
            });
            doc.objects.insert(parent_id, Object::Dictionary(dictionary! {
                "T" => Object::string_literal(parent),
                "Kids" => vec![Object::Reference(child_id)],
            }));
            attach_annotation(&mut doc, first_page, child_id);
            vec![parent_id.into()]
        }
        TemplateField::IndirectArrays { parent, child } => {
            let parent_id = doc.new_object_id();
            let child_id = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(child),
                "Parent" => parent_id,
                "Rect" => rect([100, 700, 400, 720]),
                "P" => first_page,
            });
            let kids_id = doc.add_object(Object::Array(vec![Object::Reference(child_id)]));
            doc.objects.insert(parent_id, Object::Dictionary(dictionary! {
                "T" => Object::string_literal(parent),
                "Kids" => kids_id,
            }));
            attach_annotation(&mut doc, first_page, child_id);
            let fields_id = doc.add_object(Object::Array(vec![Object::Reference(parent_id)]));
            return finish(doc, pages_id, Some(Object::Reference(fields_id)), path);
        }
    };

    let fields = (!root_fields.is_empty()).then(|| Object::Array(root_fields));
    finish(doc, pages_id, fields, path);
}

fn finish(mut doc: Document, pages_id: ObjectId, fields: Option<Object>, path: &Path) {
    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if let Some(fields) = fields {
        let acroform_id = doc.add_object(dictionary! { "Fields" => fields });
        catalog.set("AcroForm", acroform_id);
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn attach_annotation(doc: &mut Document, page_id: ObjectId, annotation_id: ObjectId) {
    doc.get_dictionary_mut(page_id)
        .unwrap()
        .set("Annots", vec![Object::Reference(annotation_id)]);
}

/// Page widths of a saved document, in page order
#[allow(dead_code)]
pub fn page_widths(document: &Document) -> Vec<i64> {
    document
        .get_pages()
        .values()
        .map(|&page_id| {
            let page = document.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}
