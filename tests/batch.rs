//! Batch generation through the library layer used by the CLI.

use randomstring::recipe::Recipe;
use randomstring::{run_batch, SourceChoice};
use std::collections::HashSet;
use string_generator::{alpha_numeric, fix, one_of, Generator};

fn token_template() -> Vec<Generator> {
    vec![fix("tok_"), alpha_numeric(16)]
}

#[tokio::test]
async fn test_seeded_single_worker_is_reproducible() {
    let a = run_batch(token_template(), SourceChoice::Seeded(42), 20, 1)
        .await
        .unwrap();
    let b = run_batch(token_template(), SourceChoice::Seeded(42), 20, 1)
        .await
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 20);
}

#[tokio::test]
async fn test_seeded_workers_produce_same_multiset() {
    let mut single = run_batch(token_template(), SourceChoice::Seeded(7), 100, 1)
        .await
        .unwrap();
    let mut parallel = run_batch(token_template(), SourceChoice::Seeded(7), 100, 4)
        .await
        .unwrap();
    single.sort();
    parallel.sort();
    assert_eq!(single, parallel);
}

#[tokio::test]
async fn test_secure_batch_is_unique() {
    let values = run_batch(token_template(), SourceChoice::Secure, 500, 3)
        .await
        .unwrap();
    assert_eq!(values.len(), 500);
    let unique: HashSet<_> = values.iter().collect();
    assert_eq!(unique.len(), 500);
    assert!(values.iter().all(|v| v.starts_with("tok_") && v.len() == 20));
}

#[tokio::test]
async fn test_batch_error_is_reported() {
    let template = vec![fix("a"), one_of(Vec::<String>::new())];
    let result = run_batch(template, SourceChoice::Secure, 3, 2).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_recipe_file_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.yaml");
    std::fs::write(
        &path,
        r#"
seed: 5
units:
  - type: fixed
    value: "order-"
  - type: named
    set: numbers
    length: 6
  - type: format
    template: "-%s"
    args: ["eu"]
"#,
    )
    .unwrap();

    let recipe = Recipe::from_file(&path).unwrap();
    let choice = SourceChoice::Seeded(recipe.seed.unwrap());
    let values = run_batch(recipe.generators().unwrap(), choice, 10, 2)
        .await
        .unwrap();

    assert_eq!(values.len(), 10);
    for value in values {
        assert!(value.starts_with("order-"));
        assert!(value.ends_with("-eu"));
        assert_eq!(value.len(), 6 + 6 + 3);
    }
}
