//! Entities command - list channels and groups

use super::ensure_fetched;
use crate::output::{print_json, Format, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use vz_api_client::{Entity, VzClient};

/// List all entities, groups with their children indented
pub async fn run(client: &VzClient, format: Format) -> Result<()> {
    let entities = client.entities().await;
    ensure_fetched(client, "entities")?;

    if format == Format::Json {
        return print_json(&entities);
    }

    Status::header(&format!("Entities ({})", count(&entities)));
    for entity in &entities {
        print_entity(entity, 0);
    }

    Ok(())
}

fn print_entity(entity: &Entity, depth: usize) {
    println!(
        "  {}{:<38} {:<14} {}",
        "  ".repeat(depth),
        entity.uuid,
        entity.entity_type.dimmed(),
        entity.title.as_deref().unwrap_or("-")
    );
    for child in &entity.children {
        print_entity(child, depth + 1);
    }
}

/// Number of entities including nested children
fn count(entities: &[Entity]) -> usize {
    entities.iter().map(|e| 1 + count(&e.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_includes_children() {
        let entities: Vec<Entity> = serde_json::from_str(
            r#"[
                {"uuid": "g", "type": "group", "children": [
                    {"uuid": "a", "type": "power"},
                    {"uuid": "b", "type": "power"}
                ]},
                {"uuid": "c", "type": "gas"}
            ]"#,
        )
        .unwrap();

        assert_eq!(count(&entities), 4);
        assert_eq!(count(&[]), 0);
    }
}
