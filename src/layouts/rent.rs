//! Layout of the archived "aluguel" (for rent) search pages
//!
//! Card detail items are not in a fixed order here, so each numeric field is
//! matched by its Portuguese label. The detail page only contributes location
//! and amenities; the condominium fee is on the card.

use crate::layouts::{
    archive_date, digits, document_texts, first_text, join_list, labelled_number,
    parse_base_url, resolve_detail, selector, text_of, ExtractError, Layout, Listing,
};
use crate::record::Record;
use scraper::{Html, Selector};
use url::Url;

const DETAIL_FIELDS: &[&str] = &["zone", "district", "characteristics"];

#[derive(Debug)]
pub struct RentLayout {
    detail_base: Url,
    card: Selector,
    title_image: Selector,
    address: Selector,
    detail_item: Selector,
    price: Selector,
    condo: Selector,
    main_link: Selector,
    location_path: Selector,
    amenity: Selector,
}

impl RentLayout {
    pub fn new(detail_base_url: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            detail_base: parse_base_url(detail_base_url)?,
            card: selector(".property-card__container")?,
            title_image: selector(
                ".property-card__carousel .carousel__item-wrapper:first-child img",
            )?,
            address: selector(".property-card__address")?,
            detail_item: selector("ul.property-card__details .property-card__detail-item")?,
            price: selector(".property-card__price")?,
            condo: selector(".property-card__price-details--condo")?,
            main_link: selector("a.property-card__main-link")?,
            location_path: selector("div > ol > li")?,
            amenity: selector("ul.qt > li")?,
        })
    }
}

/// Collapses runs of whitespace into single spaces
fn squash_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Layout for RentLayout {
    fn name(&self) -> &'static str {
        "rent"
    }

    fn listings(&self, document: &Html, page_url: &str) -> Result<Vec<Listing>, ExtractError> {
        let date = archive_date(page_url);

        let listings = document
            .select(&self.card)
            .map(|card| {
                let items: Vec<String> = card
                    .select(&self.detail_item)
                    .map(|item| squash_whitespace(&text_of(item)))
                    .collect();

                let record = Record::new()
                    .with("link", Some(page_url.to_string()))
                    .with("date", date.clone())
                    .with(
                        "title",
                        card.select(&self.title_image)
                            .next()
                            .and_then(|img| img.value().attr("alt"))
                            .map(str::to_string),
                    )
                    .with("address", first_text(card, &self.address))
                    .with("area", labelled_number(&items, &["Área"]))
                    .with("rooms", labelled_number(&items, &["Quarto"]))
                    .with("suite", labelled_number(&items, &["Suíte"]))
                    .with("bathrooms", labelled_number(&items, &["Banheiro"]))
                    .with("garage", labelled_number(&items, &["Vaga"]))
                    .with("price", first_text(card, &self.price).map(|raw| digits(&raw)))
                    .with("condo", first_text(card, &self.condo).map(|raw| digits(&raw)));

                let href = card
                    .select(&self.main_link)
                    .next()
                    .and_then(|link| link.value().attr("href"));

                Listing {
                    record,
                    detail_url: resolve_detail(&self.detail_base, href),
                }
            })
            .collect();

        Ok(listings)
    }

    fn details(&self, document: &Html) -> Record {
        let path = document_texts(document, &self.location_path);
        let zone_index = path.iter().position(|step| step.contains("Zona"));

        Record::new()
            .with("zone", zone_index.map(|i| path[i].clone()))
            .with(
                "district",
                zone_index.and_then(|i| path.get(i + 1)).cloned(),
            )
            .with(
                "characteristics",
                join_list(document_texts(document, &self.amenity)),
            )
    }

    fn detail_fields(&self) -> &'static [&'static str] {
        DETAIL_FIELDS
    }
}
