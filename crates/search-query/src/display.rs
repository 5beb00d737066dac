//! Type-appropriate presentation helpers for projected records.

use crate::projector::ResultRecord;

/// Human label for a record type; unknown types are shown as-is.
pub fn type_label(kind: &str) -> &str {
    match kind {
        "file" => "Document",
        "post" => "News",
        "page" => "Page",
        "faq" => "FAQ",
        "event" => "Event",
        other => other,
    }
}

impl ResultRecord {
    pub fn label(&self) -> &str {
        type_label(self.kind())
    }

    /// Link target for the record.
    ///
    /// Files link to `url_prefix + path`; other records use their `url`.
    /// Returns None when there is nothing to link to.
    pub fn link(&self) -> Option<String> {
        let link = match self {
            ResultRecord::File(file) => {
                if file.path.is_empty() {
                    return None;
                }
                format!("{}{}", file.url_prefix, file.path)
            }
            ResultRecord::Post(article) | ResultRecord::Page(article) => article.url.clone(),
            ResultRecord::Event(event) => event.url.clone(),
            ResultRecord::Faq(_) | ResultRecord::Generic(_) => return None,
        };
        (!link.is_empty()).then_some(link)
    }

    /// Secondary details shown under the title.
    pub fn meta(&self) -> Vec<String> {
        let mut meta = Vec::new();
        let date = &self.base().date;
        match self {
            ResultRecord::File(file) => {
                if !file.document_type.is_empty() {
                    meta.push(capitalize(&file.document_type));
                }
                if !date.is_empty() {
                    meta.push(date.clone());
                }
                if file.page > 1 {
                    meta.push(format!("Page {}", file.page));
                }
            }
            ResultRecord::Faq(faq) => {
                if !faq.categories.is_empty() {
                    meta.push(faq.categories.join(", "));
                }
            }
            ResultRecord::Event(event) => {
                if !date.is_empty() {
                    meta.push(date.clone());
                }
                if !event.event_time.is_empty() {
                    meta.push(event.event_time.clone());
                }
                if !event.event_location.is_empty() {
                    meta.push(event.event_location.clone());
                }
            }
            _ => {
                if !date.is_empty() {
                    meta.push(date.clone());
                }
            }
        }
        meta
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
