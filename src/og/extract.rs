use scraper::{Html, Selector};
use url::Url;

/// Raw metadata pulled from a page, before the image URL is made absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OgFields {
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Parse `html` and pick the preview fields, first non-empty match wins.
///
/// html5ever never fails on malformed input; broken markup only means
/// fewer tags are found.
pub fn extract_og_data(html: &str) -> OgFields {
    let document = Html::parse_document(html);

    let image = get_meta_property(&document, "og:image")
        .or_else(|| get_meta_name(&document, "twitter:image"))
        .or_else(|| get_meta_property(&document, "og:image:url"));

    let title = get_meta_property(&document, "og:title").or_else(|| get_title_tag(&document));

    let description = get_meta_property(&document, "og:description")
        .or_else(|| get_meta_name(&document, "description"));

    OgFields {
        image,
        title,
        description,
    }
}

/// Make an `og:image` value absolute against the fetched page's origin.
pub fn normalize_image_url(image: &str, page_url: &Url) -> String {
    let origin = page_url.origin().ascii_serialization();

    // Protocol-relative values take the page scheme rather than being
    // appended to the origin, which would give `https://host//cdn/x.png`.
    if image.starts_with("//") {
        format!("{}:{image}", page_url.scheme())
    } else if image.starts_with('/') {
        format!("{origin}{image}")
    } else if !image.starts_with("http") {
        format!("{origin}/{image}")
    } else {
        image.to_string()
    }
}

fn get_meta_property(doc: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    first_content(doc, &selector)
}

fn get_meta_name(doc: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    first_content(doc, &selector)
}

fn first_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
