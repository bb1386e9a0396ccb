//! Plain-text tables for list output.

use labadmin_client::models::achievement::Achievement;
use labadmin_client::models::author::author_line;
use labadmin_client::models::category::Category;
use labadmin_client::models::news::News;
use labadmin_client::models::public::PublicAchievement;
use labadmin_client::models::user::LabUser;
use labadmin_console::PagerSnapshot;
use chrono::Utc;
use labadmin_core::format::{format_date_time, or_dash, relative_time};

pub trait Row {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn yes_no(value: bool) -> String {
    (if value { "yes" } else { "no" }).to_string()
}

impl Row for LabUser {
    const HEADER: &'static [&'static str] = &["ID", "USERNAME", "NAME", "IDENTITY", "STATUS", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.display_name().to_string(),
            self.identity.label().to_string(),
            self.status_label().to_string(),
            yes_no(self.is_active),
        ]
    }
}

impl Row for Achievement {
    const HEADER: &'static [&'static str] = &["ID", "TITLE", "TYPE", "YEAR", "AUTHORS", "PUBLISHED", "VERIFIED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.type_label(),
            self.display_year(),
            author_line(&self.authors),
            yes_no(self.published),
            yes_no(self.is_verified),
        ]
    }
}

impl Row for Category {
    const HEADER: &'static [&'static str] = &["ID", "NAME", "PARENT", "SORT", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.category_name.clone(),
            or_dash(self.parent_name.as_deref()),
            self.sort_order.to_string(),
            yes_no(self.is_active),
        ]
    }
}

impl Row for News {
    const HEADER: &'static [&'static str] =
        &["ID", "TITLE", "TYPE", "STATUS", "AUTHOR", "PUBLISHED AT", "UPDATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.kind.label().to_string(),
            self.status.label().to_string(),
            or_dash(self.author.as_deref()),
            or_dash(self.publish_time.as_deref().map(format_date_time)),
            or_dash(
                self.update_time
                    .as_deref()
                    .or(self.create_time.as_deref())
                    .map(|t| relative_time(t, Utc::now())),
            ),
        ]
    }
}

impl Row for PublicAchievement {
    const HEADER: &'static [&'static str] = &["ID", "TITLE", "YEAR", "SOURCE", "AUTHORS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.display_year(),
            self.source().to_string(),
            self.author_line(),
        ]
    }
}

/// Render rows as a space-aligned table.
pub fn table<T: Row>(rows: &[T]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();
    let mut widths: Vec<usize> = T::HEADER.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = T::HEADER.iter().map(|h| h.to_string()).collect();
    std::iter::once(&header)
        .chain(body.iter())
        .map(|cells| {
            cells
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table plus a `page x/y, n total` footer.
pub fn page<F, T: Row>(snapshot: &PagerSnapshot<F, T>) -> String {
    let pages = snapshot.total.div_ceil(u64::from(snapshot.page_size.max(1)));
    format!(
        "{}\npage {}/{}, {} total",
        table(&snapshot.items),
        snapshot.page,
        pages.max(1),
        snapshot.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, u32);

    impl Row for Pair {
        const HEADER: &'static [&'static str] = &["NAME", "N"];

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let out = table(&[Pair("alpha", 1), Pair("b", 22)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "NAME   N");
        assert_eq!(lines[1], "alpha  1");
        assert_eq!(lines[2], "b      22");
    }

    #[test]
    fn news_rows_show_age_of_last_update() {
        let news = News {
            id: 4,
            title: "Open day".into(),
            summary: None,
            content: None,
            kind: labadmin_core::codes::NewsType::Event,
            status: labadmin_core::codes::NewsStatus::Draft,
            author: None,
            cover_image: None,
            publish_time: None,
            view_count: 0,
            create_time: Some("2001-02-03 04:05:06".into()),
            update_time: None,
        };
        let cells = news.cells();
        assert_eq!(cells.len(), News::HEADER.len());
        assert_eq!(cells[4], "-");
        assert_eq!(cells[6], "2001-02-03");
    }

    #[test]
    fn footer_counts_pages() {
        let snapshot = PagerSnapshot {
            filters: (),
            page: 3,
            page_size: 10,
            total: 25,
            items: vec![Pair("x", 1)],
            is_loading: false,
            load_state: labadmin_console::LoadState::Loaded,
            last_error: None,
        };
        assert!(page(&snapshot).ends_with("page 3/3, 25 total"));
    }
}
