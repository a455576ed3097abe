use json_config::{CastOptions, Caster, Config};

/// The web server section.
#[derive(Debug, Default, Config)]
struct WebConfig {
    host: String,
    port: u16,
}

/// A simple server configuration.
#[derive(Debug, Default, Config)]
struct ServerConfig {
    web_server: WebConfig,
    users: Vec<String>,
    motd: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("server.json");

    // A well-formed document casts in one go.
    std::fs::write(
        &path,
        r#"{"web_server": {"host": "localhost", "port": 8080}, "users": ["abc"]}"#,
    )?;
    let caster = Caster::new(CastOptions::builder().deny_unknown_fields(true).build()?);
    let config: ServerConfig = caster.load_file(&path)?;
    println!("Loaded config:");
    println!("{:#?}", config);

    // A broken one reports every problem, with its path.
    std::fs::write(
        &path,
        r#"{"web_server": {"host": 123}, "users": ["abc", 1], "admin": true}"#,
    )?;
    let (config, errors) = caster.load_file_with_errors::<ServerConfig>(&path)?;
    println!("Partially loaded config:");
    println!("{:#?}", config);
    for error in &errors {
        println!("  {error}");
    }

    // Fail-fast mode stops at the first one.
    match caster.load_file::<ServerConfig>(&path) {
        Ok(_) => println!("Load succeeded"),
        Err(e) => println!("Load failed (expected): {}", e),
    }

    Ok(())
}
