use anyhow::{bail, Context, Result};
use staffsearch_common::AppConfig;
use staffsearch_embedding::{EmbeddingProvider, OpenAiEmbedder};
use staffsearch_source::{source_from_config, CloudantSource};
use staffsearch_vector::{EmployeeMetadata, Match, VectorIndex};

const SAMPLE_TEXT: &str = "Python developer with FastAPI experience";

/// Verify environment, record source, embedder and index end to end
pub async fn run(config: &AppConfig) -> Result<()> {
    println!("1. Checking environment variables...");
    let missing = config.missing_required();
    if !missing.is_empty() {
        bail!("missing environment variables: {}", missing.join(", "));
    }
    config.validate()?;
    println!("   ok");

    println!("2. Checking record source...");
    if config.records_file.is_none() {
        let cloudant = CloudantSource::from_config(config)?;
        let databases = cloudant
            .list_databases()
            .await
            .context("Cloudant connection failed")?;
        if !databases.iter().any(|db| db == cloudant.database()) {
            bail!("database '{}' not found (available: {:?})", cloudant.database(), databases);
        }
        println!("   connected, database '{}' found", cloudant.database());
    }
    let source = source_from_config(config)?;
    let records = source.load_records().await.context("record loading failed")?;
    println!("   loaded {} employees from {}", records.len(), source.describe());
    match records.first() {
        Some(sample) => println!("   sample: {} skills={:?}", sample.employee_id, sample.skills),
        None => println!("   warning: source contains no indexable employees"),
    }

    println!("3. Checking embeddings ({})...", config.embedding_model);
    let embedder = OpenAiEmbedder::from_config(config)?;
    let embedding = embedder.embed(SAMPLE_TEXT).await.context("embedding failed")?;
    println!("   dimension {}", embedding.len());
    if embedding.len() != config.embedding_dim {
        bail!(
            "EMBEDDING_DIM is {} but model returned {} values",
            config.embedding_dim,
            embedding.len()
        );
    }

    println!("4. Checking vector index...");
    let found = self_search(embedding)?;
    println!("   self-search ok: {} score={}", found.employee_id, found.score);

    println!("All checks passed.");
    Ok(())
}

/// Index a single vector and confirm it is its own nearest neighbour
fn self_search(embedding: Vec<f32>) -> Result<Match> {
    let mut index = VectorIndex::new(embedding.len())?;
    index.insert(
        embedding.clone(),
        EmployeeMetadata {
            employee_id: "test_emp".to_string(),
            skills: vec!["Python".to_string(), "FastAPI".to_string()],
        },
    )?;

    match index.search(&embedding, 1)?.into_iter().next() {
        Some(m) if m.employee_id == "test_emp" && m.score == 0.0 => Ok(m),
        _ => bail!("self-search did not return the sample vector"),
    }
}
