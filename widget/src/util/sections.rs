//! Single-page section switching.
//!
//! Each page section is a `<section class="page-section" id="...">`; nav links
//! point at `#id`. The section named by the URL hash is shown, the others get
//! the `hidden` attribute, and the matching `.nav-link` gets `active`.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

pub const DEFAULT_SECTION: &str = "home";

/// Section id named by a location hash, or the default section.
pub fn section_from_hash(hash: &str) -> &str {
    let id = hash.trim_start_matches('#').trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        DEFAULT_SECTION
    } else {
        id
    }
}

/// Show the section for the current location hash.
pub fn activate_current() {
    #[cfg(feature = "csr")]
    {
        let hash = web_sys::window().and_then(|w| w.location().hash().ok()).unwrap_or_default();
        activate(section_from_hash(&hash));
    }
}

/// Show section `id` and mark its nav link active. Unknown ids are ignored.
pub fn activate(id: &str) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if document.get_element_by_id(id).is_none() {
            log::debug!("sections: no section #{id}");
            return;
        }

        let elements = |selector: &str| {
            document
                .query_selector_all(selector)
                .map(|list| {
                    (0..list.length())
                        .filter_map(|i| list.item(i))
                        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        };

        for section in elements(".page-section") {
            if section.id() == id {
                let _ = section.remove_attribute("hidden");
            } else {
                let _ = section.set_attribute("hidden", "");
            }
        }

        let target = format!("#{id}");
        for link in elements(".nav-link") {
            let active = link.get_attribute("href").as_deref() == Some(target.as_str());
            let _ = link.class_list().toggle_with_force("active", active);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}
