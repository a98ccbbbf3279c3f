use crate::types::{Address, MISSING_WEBSITE, School, SchoolType};

use scraper::{ElementRef, Html, Node, Selector};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing expected element: {0}")]
    MissingElement(&'static str),
    #[error("Failed to parse result count from '{0}'")]
    ResultCount(String),
    #[error("School info for '{name}' has {found} comma fields, expected at least 3")]
    FieldCount { name: String, found: usize },
}

/// Reads the total number of matching listings from the results-count
/// element on a listing page. The count drives pagination, so a missing
/// or non-numeric count is fatal for the whole category.
pub fn parse_result_count(html: &str) -> Result<usize, ParseError> {
    let document = Html::parse_document(html);
    let count_selector = Selector::parse("div.page_body div.document div.searched b").unwrap();

    let text = document
        .select(&count_selector)
        .next()
        .ok_or(ParseError::MissingElement("results count"))?
        .text()
        .collect::<String>();

    text.trim()
        .parse()
        .map_err(|_| ParseError::ResultCount(text.trim().to_string()))
}

/// Extracts every listing entry on one results page, in document order.
/// A single malformed entry fails the whole page; there is no
/// skip-and-continue.
pub fn parse_listing_page(html: &str) -> Result<Vec<School>, ParseError> {
    let document = Html::parse_document(html);
    let entry_selector = Selector::parse("div.page_body div.document div.doc_entry").unwrap();

    document.select(&entry_selector).map(parse_entry).collect()
}

/// Parses one entry block into a `School`.
///
/// The info text is a position-dependent comma-separated blob:
/// field 0 is the type label (`Type af skole:` prefix), field 1 the
/// street, field 2 the dean (role label prefix, city name embedded via
/// the city span), and field 3 the website when exactly four fields are
/// present. The format is trusted as-is; deviations surface as
/// `ParseError` rather than being guessed around.
pub fn parse_entry(entry: ElementRef) -> Result<School, ParseError> {
    let name_selector = Selector::parse("div.doc_entry_desc div.school_name a.red").unwrap();
    let info_selector = Selector::parse("div.school_info").unwrap();
    let city_selector = Selector::parse("span.city").unwrap();

    let name = entry
        .select(&name_selector)
        .next()
        .ok_or(ParseError::MissingElement("school name link"))?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let info = entry
        .select(&info_selector)
        .next()
        .ok_or(ParseError::MissingElement("school info block"))?;

    let info_text = text_without_ads(info);
    let fields: Vec<&str> = info_text.split(',').collect();
    if fields.len() < 3 {
        return Err(ParseError::FieldCount {
            name,
            found: fields.len(),
        });
    }

    let label = fields[0].replace("Type af skole:", "");
    let school_type = SchoolType::from_label(label.trim());

    let city = info
        .select(&city_selector)
        .next()
        .ok_or(ParseError::MissingElement("city span"))?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let address = Address::new(fields[1].trim(), city.clone());

    let dean = fields[2]
        .replace(&city, "")
        .replace("Skoleleder:", "")
        .replace("Direktør:", "")
        .trim()
        .to_string();

    let website = if fields.len() == 4 {
        fields[3].trim().to_string()
    } else {
        MISSING_WEBSITE.to_string()
    };

    Ok(School::new(name, school_type, dean, address, website))
}

/// Collects the text of the info block while skipping advertisement
/// subtrees. A pure projection over the parsed fragment; the document
/// itself is never mutated.
fn text_without_ads(info: ElementRef) -> String {
    let mut text = String::new();
    collect_text(info, &mut text);
    text
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(el) => {
                if el.name() == "div" && el.classes().any(|c| c == "advertise") {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_page(count: &str, entries: &[&str]) -> String {
        format!(
            r#"<html><body><div class="page_body"><div class="document">
            <div class="searched">Der blev fundet <b>{count}</b> skoler</div>
            {}
            </div></div></body></html>"#,
            entries.join("\n")
        )
    }

    fn entry(name: &str, info: &str) -> String {
        format!(
            r#"<div class="doc_entry">
            <div class="doc_entry_desc"><div class="school_name"><a class="red" href="/skole/1"> {name} </a></div></div>
            <div class="school_info">{info}</div>
            </div>"#
        )
    }

    const FULL_INFO: &str = "Type af skole:Hovedskole (institution med enheder), Hovedgade 1, \
        Skoleleder:Jane Doe <span class=\"city\"> Aarhus </span>, http://www.testskolen.dk";

    #[test]
    fn test_parse_result_count() {
        let html = listing_page("143", &[]);
        assert_eq!(parse_result_count(&html).unwrap(), 143);
    }

    #[test]
    fn test_parse_result_count_not_a_number() {
        let html = listing_page("mange", &[]);
        let err = parse_result_count(&html).unwrap_err();
        assert!(matches!(err, ParseError::ResultCount(ref s) if s == "mange"));
    }

    #[test]
    fn test_parse_result_count_missing_element() {
        let err = parse_result_count("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::MissingElement("results count")));
    }

    #[test]
    fn test_parse_entry_all_fields() {
        let html = listing_page("1", &[&entry("Testskolen", FULL_INFO)]);
        let schools = parse_listing_page(&html).unwrap();

        assert_eq!(schools.len(), 1);
        let school = &schools[0];
        assert_eq!(school.name, "Testskolen");
        assert_eq!(school.school_type, SchoolType::Hovedskole);
        assert_eq!(school.dean, "Jane Doe");
        assert_eq!(school.address, Address::new("Hovedgade 1", "Aarhus"));
        assert_eq!(school.website, "http://www.testskolen.dk");
    }

    #[test]
    fn test_parse_entry_without_website_gets_placeholder() {
        let info = "Type af skole:Institution uden enheder, Skolevej 2, \
            Skoleleder:John Smith <span class=\"city\">Odense</span>";
        let html = listing_page("1", &[&entry("Lilleskolen", info)]);
        let schools = parse_listing_page(&html).unwrap();

        assert_eq!(schools[0].website, MISSING_WEBSITE);
        assert_ne!(schools[0].website, "");
    }

    #[test]
    fn test_parse_entry_direktor_label() {
        let info = "Type af skole:Afdeling (underordnet enhed), Nygade 7, \
            Direktør:Bo Hansen <span class=\"city\">København</span>, http://example.dk";
        let html = listing_page("1", &[&entry("Byskolen", info)]);
        let schools = parse_listing_page(&html).unwrap();

        assert_eq!(schools[0].school_type, SchoolType::Afdeling);
        assert_eq!(schools[0].dean, "Bo Hansen");
    }

    #[test]
    fn test_parse_entry_unrecognized_label_is_unknown() {
        let info = "Type af skole:Efterskole, Markvej 9, \
            Skoleleder:Eva Juhl <span class=\"city\">Vejle</span>";
        let html = listing_page("1", &[&entry("Markskolen", info)]);
        let schools = parse_listing_page(&html).unwrap();

        assert_eq!(schools[0].school_type, SchoolType::Unknown);
    }

    #[test]
    fn test_advertisements_are_excluded() {
        // The ad text carries a comma, so keeping it would shift every
        // field after it.
        let with_ad = "Type af skole:Hovedskole (institution med enheder), Hovedgade 1\
            <div class=\"advertise\">Anbefalet: skolefoto, bestil i dag</div>, \
            Skoleleder:Jane Doe <span class=\"city\"> Aarhus </span>, http://www.testskolen.dk";

        let plain = parse_listing_page(&listing_page("1", &[&entry("Testskolen", FULL_INFO)]))
            .unwrap()
            .remove(0);
        let filtered = parse_listing_page(&listing_page("1", &[&entry("Testskolen", &with_ad)]))
            .unwrap()
            .remove(0);

        assert_eq!(filtered, plain);
    }

    #[test]
    fn test_parse_listing_page_preserves_order() {
        let info_b = "Type af skole:Institution uden enheder, Skolevej 2, \
            Skoleleder:John Smith <span class=\"city\">Odense</span>";
        let html = listing_page(
            "2",
            &[&entry("Testskolen", FULL_INFO), &entry("Lilleskolen", info_b)],
        );
        let schools = parse_listing_page(&html).unwrap();

        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].name, "Testskolen");
        assert_eq!(schools[1].name, "Lilleskolen");
    }

    #[test]
    fn test_missing_info_block_is_an_error() {
        let bare = r#"<div class="doc_entry">
            <div class="doc_entry_desc"><div class="school_name"><a class="red">Tom Skole</a></div></div>
            </div>"#;
        let err = parse_listing_page(&listing_page("1", &[bare])).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement("school info block")));
    }

    #[test]
    fn test_too_few_fields_is_an_error() {
        let info = "Type af skole:Institution uden enheder og ikke andet";
        let html = listing_page("1", &[&entry("Tom Skole", info)]);
        let err = parse_listing_page(&html).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { found: 1, .. }));
    }
}
