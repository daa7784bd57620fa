//! Server-side page renderer
//!
//! Turns a café's stored block sequence into the HTML landing page.
//! One section per renderable block, in stored order. Blocks that have
//! nothing to show (empty gallery, empty menu preview) and blocks of
//! unknown kind render nothing; the rest of the page still renders.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::db::models::{Cafe, MenuItem};
use crate::website::blocks::{BackgroundStyle, Block};

/// Visual theme applied to the page shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Aroma,
    Luxury,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Aroma => "aroma",
            Layout::Luxury => "luxury",
        }
    }

    /// Parse a stored layout name. Unknown names log and fall back to
    /// aroma so a stale config never blanks the page.
    pub fn parse_or_default(name: &str) -> Layout {
        Layout::from_str(name).unwrap_or_else(|_| {
            tracing::warn!(layout = name, "Unknown layout, falling back to aroma");
            Layout::Aroma
        })
    }
}

impl FromStr for Layout {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aroma" => Ok(Layout::Aroma),
            "luxury" => Ok(Layout::Luxury),
            _ => Err(()),
        }
    }
}

/// Render the full landing page.
///
/// `menu_items` is the café's available catalog, already fetched by
/// the caller; menu-preview blocks slice it per their own config.
pub fn render_page(cafe: &Cafe, layout: Layout, blocks: &[Block], menu_items: &[MenuItem]) -> String {
    let mut sections = String::new();
    for block in blocks {
        if let Some(html) = render_block(cafe, block, menu_items) {
            sections.push_str(&html);
            sections.push('\n');
        }
    }

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n\
         <body class=\"layout-{layout}\">\n{sections}</body>\n</html>\n",
        title = escape_html(&cafe.name),
        layout = layout.as_str(),
    )
}

/// Render one block, or `None` when it has nothing to show.
pub fn render_block(cafe: &Cafe, block: &Block, menu_items: &[MenuItem]) -> Option<String> {
    match block {
        Block::Hero(hero) => Some(render_hero(cafe, hero)),
        Block::Gallery(gallery) => render_gallery(gallery),
        Block::MenuPreview(preview) => render_menu_preview(preview, menu_items),
        Block::Cta(cta) => Some(render_cta(cta)),
        Block::Footer => Some(render_footer(cafe)),
        Block::Unrecognized { kind } => {
            tracing::warn!(kind = %kind, "Unknown block type, skipping");
            None
        }
    }
}

fn render_hero(cafe: &Cafe, hero: &crate::website::blocks::HeroBlock) -> String {
    let heading = hero
        .heading
        .as_deref()
        .or(cafe.tagline.as_deref())
        .unwrap_or("Welcome to Our Cafe");
    let subheading = hero
        .subheading
        .as_deref()
        .or(cafe.description.as_deref())
        .unwrap_or("Experience the best coffee in town");

    let mut html = String::from("<section class=\"hero\">");
    if let Some(image) = hero.background_image.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(
            html,
            "<img class=\"hero-bg\" src=\"{}\" alt=\"{}\">",
            escape_html(image),
            escape_html(heading)
        );
    }
    let _ = write!(
        html,
        "<h1>{}</h1><p>{}</p>",
        escape_html(heading),
        escape_html(subheading)
    );
    // button only when both text and link are configured
    if let (Some(text), Some(link)) = (hero.cta_text.as_deref(), hero.cta_link.as_deref())
        && !text.is_empty()
        && !link.is_empty()
    {
        let _ = write!(
            html,
            "<a class=\"hero-cta\" href=\"{}\"{}>{}</a>",
            escape_html(link),
            external_attrs(link),
            escape_html(text)
        );
    }
    html.push_str("</section>");
    html
}

fn render_gallery(gallery: &crate::website::blocks::GalleryBlock) -> Option<String> {
    if gallery.images.is_empty() {
        return None;
    }
    let mut html = format!(
        "<section class=\"gallery columns-{}\">",
        gallery.effective_columns()
    );
    if let Some(heading) = gallery.heading.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(html, "<h2>{}</h2>", escape_html(heading));
    }
    html.push_str("<div class=\"gallery-grid\">");
    for image in &gallery.images {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&image.url),
            escape_html(&image.alt)
        );
    }
    html.push_str("</div></section>");
    Some(html)
}

fn render_menu_preview(
    preview: &crate::website::blocks::MenuPreviewBlock,
    menu_items: &[MenuItem],
) -> Option<String> {
    let items: Vec<&MenuItem> = menu_items
        .iter()
        .filter(|i| !preview.filter_popular || i.is_popular)
        .take(preview.show_count)
        .collect();
    if items.is_empty() {
        return None;
    }

    let mut html = String::from("<section class=\"menu-preview\">");
    let _ = write!(html, "<h2>{}</h2>", escape_html(&preview.heading));
    if let Some(description) = preview.description.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(html, "<p>{}</p>", escape_html(description));
    }
    html.push_str("<div class=\"menu-grid\">");
    for item in items {
        let _ = write!(
            html,
            "<article class=\"menu-card{popular}\">{image}<h3>{name}</h3>{description}\
             <span class=\"price\">₹{price}</span></article>",
            popular = if item.is_popular { " popular" } else { "" },
            image = item
                .image_url
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|url| format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(url),
                    escape_html(&item.name)
                ))
                .unwrap_or_default(),
            name = escape_html(&item.name),
            description = item
                .description
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|d| format!("<p>{}</p>", escape_html(d)))
                .unwrap_or_default(),
            price = item.price,
        );
    }
    html.push_str("</div></section>");
    Some(html)
}

fn render_cta(cta: &crate::website::blocks::CtaBlock) -> String {
    let style = match cta.background_style {
        BackgroundStyle::Solid => "solid",
        BackgroundStyle::Gradient => "gradient",
    };
    let mut html = format!("<section class=\"cta cta-{style}\">");
    let _ = write!(html, "<h2>{}</h2>", escape_html(&cta.heading));
    if let Some(description) = cta.description.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(html, "<p>{}</p>", escape_html(description));
    }
    let _ = write!(
        html,
        "<a class=\"cta-button\" href=\"{}\"{}>{}</a></section>",
        escape_html(&cta.button_link),
        external_attrs(&cta.button_link),
        escape_html(&cta.button_text)
    );
    html
}

/// External links open in a new tab; in-site paths stay in place.
fn external_attrs(link: &str) -> &'static str {
    if link.starts_with("http") {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    } else {
        ""
    }
}

fn render_footer(cafe: &Cafe) -> String {
    let mut html = String::from("<footer>");
    let _ = write!(html, "<p>{}</p>", escape_html(&cafe.name));
    if let Some(phone) = cafe.staff_phone.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(html, "<p>{}</p>", escape_html(phone));
    }
    html.push_str("</footer>");
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
