//! Minimal HTML preview generation
//!
//! The preview document is a human-readable companion to the metadata
//! file. Only its presence and ID are part of the core contract, so the
//! rendering here is deliberately plain: crate name plus an entity table.

use serde_json::Value;

use crate::rocrate::RoCrate;

/// Render a self-contained HTML preview for a crate
pub fn render_preview(rocrate: &RoCrate) -> String {
    let title = rocrate
        .root_dataset()
        .and_then(|root| root.property("name"))
        .and_then(Value::as_str)
        .unwrap_or("RO-Crate");

    let mut rows = String::new();
    for entity in rocrate.entities() {
        rows.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td></tr>\n",
            escape(entity.id()),
            escape(&entity.types().join(", "))
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <table>\n\
         <thead>\n\
         <tr><th>@id</th><th>@type</th></tr>\n\
         </thead>\n\
         <tbody>\n\
         {rows}\
         </tbody>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        rows = rows
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
