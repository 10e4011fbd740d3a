//! Layout of the "aluguel" search pages archived during 2018
//!
//! Same fields as [`RentLayout`](crate::layouts::RentLayout), but this
//! generation of the site used short generated class names. The card title is
//! the text of its main link rather than an image caption.

use crate::layouts::{
    archive_date, digits, document_texts, first_text, join_list, labelled_number,
    parse_base_url, resolve_detail, selector, text_of, ExtractError, Layout, Listing,
};
use crate::record::Record;
use scraper::{Html, Selector};
use url::Url;

const DETAIL_FIELDS: &[&str] = &["zone", "district", "characteristics"];

#[derive(Debug)]
pub struct Rent2018Layout {
    detail_base: Url,
    card: Selector,
    title_link: Selector,
    address: Selector,
    detail_item: Selector,
    price: Selector,
    condo: Selector,
    location_path: Selector,
    amenity: Selector,
}

impl Rent2018Layout {
    pub fn new(detail_base_url: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            detail_base: parse_base_url(detail_base_url)?,
            card: selector("div.kG > div")?,
            title_link: selector(".cK > a")?,
            address: selector(".cM")?,
            detail_item: selector("ul.cO > li")?,
            price: selector(".cI")?,
            condo: selector(".js-condo-price")?,
            location_path: selector(".kU > li")?,
            amenity: selector("ul.bS > li")?,
        })
    }
}

impl Layout for Rent2018Layout {
    fn name(&self) -> &'static str {
        "rent-2018"
    }

    fn listings(&self, document: &Html, page_url: &str) -> Result<Vec<Listing>, ExtractError> {
        let date = archive_date(page_url);

        let listings = document
            .select(&self.card)
            .map(|card| {
                let items: Vec<String> = card.select(&self.detail_item).map(text_of).collect();
                let link = card.select(&self.title_link).next();

                let record = Record::new()
                    .with("link", Some(page_url.to_string()))
                    .with("date", date.clone())
                    .with("title", link.map(text_of))
                    .with("address", first_text(card, &self.address))
                    .with("area", labelled_number(&items, &["Área"]))
                    .with("rooms", labelled_number(&items, &["Quarto"]))
                    .with("suite", labelled_number(&items, &["Suíte"]))
                    .with("bathrooms", labelled_number(&items, &["Banheiro"]))
                    .with("garage", labelled_number(&items, &["Vaga"]))
                    .with("price", first_text(card, &self.price).map(|raw| digits(&raw)))
                    .with("condo", first_text(card, &self.condo).map(|raw| digits(&raw)));

                Listing {
                    record,
                    detail_url: resolve_detail(
                        &self.detail_base,
                        link.and_then(|a| a.value().attr("href")),
                    ),
                }
            })
            .collect();

        Ok(listings)
    }

    fn details(&self, document: &Html) -> Record {
        let path = document_texts(document, &self.location_path);
        let zone_index = path.iter().position(|step| step.contains("Zona"));

        let amenities = document_texts(document, &self.amenity)
            .into_iter()
            .filter(|amenity| !amenity.is_empty())
            .collect();

        Record::new()
            .with("zone", zone_index.map(|i| path[i].clone()))
            .with(
                "district",
                zone_index.and_then(|i| path.get(i + 1)).cloned(),
            )
            .with("characteristics", join_list(amenities))
    }

    fn detail_fields(&self) -> &'static [&'static str] {
        DETAIL_FIELDS
    }
}
