//! Plain-text rendering of controller state.

use comfy_table::{ContentArrangement, Table};
use pawfind_core::common::{NoticeLevel, Notices};
use pawfind_core::search::{PhotoView, SearchState};

/// Prints queued notices, oldest first. Warnings go to stderr.
pub fn print_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Info => println!("{notice}"),
            NoticeLevel::Warning => eprintln!("{notice}"),
        }
    }
}

pub fn breeds(breeds: &[String]) -> String {
    if breeds.is_empty() {
        return "No breeds available.".to_string();
    }
    breeds.join("\n")
}

/// Current page of dogs followed by the status line.
pub fn results(search: &SearchState) -> String {
    if search.has_no_results() {
        return format!("No dogs match the current filters.\n{}", status_line(search));
    }
    if search.dogs.is_empty() {
        return if search.is_loading() {
            "Loading...".to_string()
        } else {
            "No dogs loaded.".to_string()
        };
    }
    format!("{}\n{}", dogs_table(search), status_line(search))
}

fn dogs_table(search: &SearchState) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Breed", "Age", "Zip Code"]);
    for (index, dog) in search.dogs.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            dog.name.clone(),
            dog.breed.clone(),
            dog.age.to_string(),
            dog.zip_code.clone(),
        ]);
    }
    table.to_string()
}

pub fn status_line(search: &SearchState) -> String {
    let params = &search.params;
    let breed = params.breed.as_deref().unwrap_or("all breeds");
    format!(
        "Page {} of {} | {} dogs | {} | sort {} | {} per page",
        params.page, search.total_pages, search.total, breed, params.sort, params.page_size
    )
}

pub fn photo(view: &PhotoView) -> String {
    format!("Photo of {}: {}", view.name, view.img)
}

#[cfg(test)]
mod tests {
    use pawfind_types::Dog;

    use super::*;

    fn poodle(id: &str, name: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: name.to_string(),
            age: 4,
            zip_code: "30301".to_string(),
            breed: "Poodle".to_string(),
        }
    }

    #[test]
    fn results_table_lists_dogs_in_order() {
        let mut search = SearchState::new(10);
        search.searched = true;
        search.result_ids = vec!["a".into(), "b".into()];
        search.total = 25;
        search.recompute_total_pages();
        search.params.breed = Some("Poodle".to_string());
        search.dogs = vec![poodle("a", "Biscuit"), poodle("b", "Waffles")];

        let out = results(&search);

        let biscuit = out.find("Biscuit").unwrap();
        let waffles = out.find("Waffles").unwrap();
        assert!(biscuit < waffles);
        assert!(out.contains("Page 1 of 3 | 25 dogs | Poodle | sort breed:asc"));
    }

    #[test]
    fn empty_search_says_no_results() {
        let mut search = SearchState::new(10);
        search.searched = true;
        assert!(results(&search).starts_with("No dogs match"));
    }
}
