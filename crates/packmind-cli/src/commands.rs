//! Command dispatch for the `packmind` binary.

use std::time::Duration;

use packmind_core::{AppError, Config};
use packmind_engine::{EngineSettings, Notification, Notifier, ReminderEngine};
use packmind_store::{ConditionTag, HomeLocation, HomeStore, Item, ItemStore, Session, UserProfile};
use packmind_trips::{recommend, TripDuration};
use packmind_weather::{
    select_forecast, Coordinates, EnvironmentReading, GeocodeClient, WeatherProvider,
};

/// Prints reminders to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: &Notification) {
        println!("🔔 {} {}", notification.title, notification.body);
    }
}

struct Ctx {
    config: Config,
    items: ItemStore,
    home: HomeStore,
    session: Session,
}

impl Ctx {
    fn open() -> Result<Self, AppError> {
        let (config, _validation) = Config::load_validated()?;
        let dir = config.config_dir.clone();
        Ok(Self {
            items: ItemStore::open(&dir)?,
            home: HomeStore::open(&dir)?,
            session: Session::open(&dir)?,
            config,
        })
    }

    fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            away_threshold_km: self.config.engine.away_threshold_km,
            fallback_temperature_c: self.config.weather.fallback_temperature_c,
        }
    }

    fn geocode(&self) -> Result<GeocodeClient, AppError> {
        GeocodeClient::with_base_url(&self.config.geocode.base_url)
            .map_err(anyhow::Error::new)
            .map_err(AppError::from)
    }

    /// Gate for commands that need a session, mirroring the login
    /// redirect of the web flow.
    fn require_login(&self) -> Result<Option<UserProfile>, AppError> {
        if !self.session.is_logged_in()? {
            println!("Not logged in. Run `packmind login` first.");
            return Ok(None);
        }
        Ok(Some(self.session.profile()?))
    }
}

pub async fn run(args: Vec<String>) -> Result<(), AppError> {
    let ctx = Ctx::open()?;
    let mut args = args.iter().map(String::as_str);

    match args.next() {
        Some("login") => login(&ctx, args.next(), args.next()),
        Some("logout") => logout(&ctx),
        Some("whoami") => whoami(&ctx),
        Some("item") => match args.next() {
            Some("add") => {
                let (name, condition) = (args.next(), args.next());
                item_add(&ctx, name, condition)
            }
            Some("list") => item_list(&ctx),
            Some("remove") => item_remove(&ctx, args.next()),
            _ => usage(),
        },
        Some("home") => match args.next() {
            Some("set") => {
                let query = args.collect::<Vec<_>>().join(" ");
                home_set(&ctx, &query).await
            }
            Some("here") => home_here(&ctx, args.next(), args.next()).await,
            Some("show") => home_show(&ctx),
            _ => usage(),
        },
        Some("status") => status(&ctx, args.next(), args.next()).await,
        Some("check") => check(&ctx, args.next(), args.next()).await,
        Some("watch") => watch(&ctx, args.next(), args.next(), args.next()).await,
        Some("trip") => trip(&ctx, args.next(), args.next()),
        Some("help") => {
            print_usage();
            Ok(())
        }
        _ => usage(),
    }
}

/// Print usage and fail, so misuse exits nonzero.
fn usage() -> Result<(), AppError> {
    print_usage();
    Err(AppError::Usage("unrecognized or incomplete command".to_string()))
}

fn print_usage() {
    eprintln!(
        "Usage: packmind <command>\n\
         \n\
         Commands:\n\
           login [name] [email]       Log in (no credentials; stores a profile)\n\
           logout                     Log out\n\
           whoami                     Show the active profile\n\
           item add <name> <tag>      Add a packing item (tag: always|rain|hot|cold|leaving-home)\n\
           item list                  List packing items\n\
           item remove <id>           Remove a packing item\n\
           home set <address>         Set home by address (geocoded)\n\
           home here <lat> <lon>      Set home to coordinates\n\
           home show                  Show the saved home location\n\
           status <lat> <lon>         Show current place and distance from home\n\
           check <lat> <lon>          Fetch weather and evaluate reminders once\n\
           watch <lat> <lon> [secs]   Re-check on an interval (default 60s); Ctrl-C to stop\n\
           trip <destination> [day|weekend|week|long]\n\
                                      Packing recommendations for a trip\n\
           help                       Show this message"
    );
}

fn parse_coord(value: Option<&str>, what: &str) -> Option<f64> {
    match value {
        Some(s) => match s.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                eprintln!("Invalid {}: '{}'", what, s);
                None
            }
        },
        None => {
            eprintln!("Missing {}", what);
            None
        }
    }
}

fn login(ctx: &Ctx, name: Option<&str>, email: Option<&str>) -> Result<(), AppError> {
    // Absent fields keep whatever an earlier login stored.
    let stored = ctx.session.profile()?;
    let profile = UserProfile {
        name: name.map(str::to_string).or(stored.name),
        email: email.map(str::to_string).or(stored.email),
    };

    ctx.session.log_in(&profile)?;
    println!("Welcome, {}", profile.display_name());
    Ok(())
}

fn logout(ctx: &Ctx) -> Result<(), AppError> {
    ctx.session.log_out()?;
    println!("Logged out.");
    Ok(())
}

fn whoami(ctx: &Ctx) -> Result<(), AppError> {
    if let Some(profile) = ctx.require_login()? {
        println!("Logged in as {}", profile.display_name());
    }
    Ok(())
}

fn item_add(ctx: &Ctx, name: Option<&str>, condition: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let (Some(name), Some(condition)) = (name, condition) else {
        eprintln!("Usage: packmind item add <name> <always|rain|hot|cold|leaving-home>");
        return Ok(());
    };

    let Some(tag) = ConditionTag::parse_known(condition) else {
        eprintln!(
            "Unknown condition '{}'. Valid: always, rain, hot, cold, leaving-home",
            condition
        );
        return Ok(());
    };

    let item = ctx.items.add(name, tag)?;
    println!("Added {} ({}), id {}", item.name, item.condition.description(), item.id);
    Ok(())
}

fn item_list(ctx: &Ctx) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let items = ctx.items.load()?;
    if items.is_empty() {
        println!("No items added yet");
        return Ok(());
    }

    for item in items {
        println!("  {}  {} ({})", item.id, item.name, item.condition.description());
    }
    Ok(())
}

fn item_remove(ctx: &Ctx, id: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let Some(id) = id else {
        eprintln!("Usage: packmind item remove <id>");
        return Ok(());
    };

    if ctx.items.remove(id)? {
        println!("Removed {}", id);
    } else {
        println!("No item with id {}", id);
    }
    Ok(())
}

async fn home_set(ctx: &Ctx, query: &str) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    if query.is_empty() {
        eprintln!("Usage: packmind home set <address>");
        return Ok(());
    }

    let geocode = ctx.geocode()?;
    let place = match geocode.forward(query).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Geocoding '{}' failed: {}", query, e);
            println!("Home location: {}", e.user_message());
            return Ok(());
        }
    };

    let home = HomeLocation {
        latitude: place.coordinates.latitude,
        longitude: place.coordinates.longitude,
        address: query.to_string(),
    };
    ctx.home.save(&home)?;
    println!("Home location: {} ({})", query, place.coordinates.label());
    Ok(())
}

async fn home_here(ctx: &Ctx, lat: Option<&str>, lon: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) =
        (parse_coord(lat, "latitude"), parse_coord(lon, "longitude"))
    else {
        return Ok(());
    };

    let coords = Coordinates::new(latitude, longitude);
    let geocode = ctx.geocode()?;
    let address = geocode.reverse_or_coords(coords).await;

    let home = HomeLocation {
        latitude,
        longitude,
        address: address.clone(),
    };
    ctx.home.save(&home)?;
    println!("Home location: {}", address);
    Ok(())
}

fn home_show(ctx: &Ctx) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    match ctx.home.load()? {
        Some(home) => println!(
            "Home location: {} ({:.5}, {:.5})",
            home.address, home.latitude, home.longitude
        ),
        None => println!("Home location: not set"),
    }
    Ok(())
}

async fn status(ctx: &Ctx, lat: Option<&str>, lon: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) =
        (parse_coord(lat, "latitude"), parse_coord(lon, "longitude"))
    else {
        return Ok(());
    };
    let coords = Coordinates::new(latitude, longitude);

    let geocode = ctx.geocode()?;
    println!("Current location: {}", geocode.reverse_or_coords(coords).await);

    let mut engine = ReminderEngine::new(ctx.engine_settings(), Box::new(TerminalNotifier));
    engine.set_home(ctx.home.load()?);
    engine.update_location(coords);

    println!("{}", home_distance_line(&engine));
    Ok(())
}

/// One-line home/away status for display.
fn home_distance_line(engine: &ReminderEngine) -> String {
    match engine.away_from_home() {
        Some(true) => format!(
            "Distance from home: {:.2} km",
            engine.distance_from_home_km().unwrap_or_default()
        ),
        Some(false) => "You are at home".to_string(),
        None => "Home location: not set".to_string(),
    }
}

async fn check(ctx: &Ctx, lat: Option<&str>, lon: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) =
        (parse_coord(lat, "latitude"), parse_coord(lon, "longitude"))
    else {
        return Ok(());
    };
    let coords = Coordinates::new(latitude, longitude);

    let items = ctx.items.load()?;
    let mut engine = ReminderEngine::new(ctx.engine_settings(), Box::new(TerminalNotifier));
    engine.set_home(ctx.home.load()?);
    let seq = engine.update_location(coords);

    let provider = WeatherProvider::with_base_url(
        &ctx.config.weather.api_key,
        &ctx.config.weather.base_url,
    )
    .map_err(anyhow::Error::new)?;

    match provider.current(coords).await {
        Ok(observation) => {
            println!(
                "Current weather: {}, {:.0}°C",
                observation.description, observation.temperature_c
            );
            println!(
                "Humidity: {}%, Wind: {:.0} m/s",
                observation.humidity, observation.wind_speed_ms
            );
            engine.apply_reading(observation.reading(), seq);
        }
        Err(e) => {
            tracing::warn!("Weather fetch failed: {}", e);
            println!("{}", e.user_message());
            let fallback = engine.fallback_reading();
            println!(
                "Fallback weather: {}, {:.0}°C",
                fallback.condition, fallback.temperature_c
            );
            engine.apply_reading(fallback, seq);
        }
    }

    println!("{}", home_distance_line(&engine));

    let matched = engine.evaluate(&items);
    if matched.is_empty() {
        println!("Nothing extra to pack right now.");
    }
    Ok(())
}

async fn watch(
    ctx: &Ctx,
    lat: Option<&str>,
    lon: Option<&str>,
    every: Option<&str>,
) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) =
        (parse_coord(lat, "latitude"), parse_coord(lon, "longitude"))
    else {
        return Ok(());
    };
    let coords = Coordinates::new(latitude, longitude);

    let every_secs = match every {
        None => 60,
        Some(s) => match s.parse::<u64>() {
            Ok(v) if v > 0 => v,
            _ => {
                eprintln!("Invalid interval '{}': expected seconds > 0", s);
                return usage();
            }
        },
    };

    let items = ctx.items.load()?;
    let mut engine = ReminderEngine::new(ctx.engine_settings(), Box::new(TerminalNotifier));
    engine.set_home(ctx.home.load()?);

    let provider = WeatherProvider::with_base_url(
        &ctx.config.weather.api_key,
        &ctx.config.weather.base_url,
    )
    .map_err(anyhow::Error::new)?;

    println!(
        "Watching {} every {}s. Press Ctrl-C to stop.",
        coords.label(),
        every_secs
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(every_secs));
    loop {
        ticker.tick().await;
        let (reading, matched) = watch_tick(&mut engine, &provider, &items, coords).await;
        println!(
            "{}, {:.0}°C: {} item(s) to pack",
            reading.condition,
            reading.temperature_c,
            matched.len()
        );
    }
}

/// One watch iteration: refresh the location sequence, fetch weather
/// (falling back on failure), and evaluate the item list. Notifications
/// fire through the engine's debounce.
async fn watch_tick<'a>(
    engine: &mut ReminderEngine,
    provider: &WeatherProvider,
    items: &'a [Item],
    coords: Coordinates,
) -> (EnvironmentReading, Vec<&'a Item>) {
    let seq = engine.update_location(coords);

    let reading = match provider.current(coords).await {
        Ok(observation) => observation.reading(),
        Err(e) => {
            tracing::warn!("Weather fetch failed: {}", e);
            engine.fallback_reading()
        }
    };
    engine.apply_reading(reading.clone(), seq);

    let matched = engine.evaluate(items);
    (reading, matched)
}

fn trip(ctx: &Ctx, destination: Option<&str>, duration: Option<&str>) -> Result<(), AppError> {
    if ctx.require_login()?.is_none() {
        return Ok(());
    }

    let Some(destination) = destination else {
        eprintln!("Usage: packmind trip <destination> [day|weekend|week|long]");
        return Ok(());
    };

    let duration = match duration {
        None => TripDuration::Day,
        Some(s) => match TripDuration::parse(s) {
            Some(d) => d,
            None => {
                eprintln!("Unknown duration '{}'. Valid: day, weekend, week, long", s);
                return Ok(());
            }
        },
    };

    let forecast = select_forecast(destination);
    println!("Packing for {}", destination);
    println!("Forecast: {}", forecast.description);
    println!(
        "Temperature: {:.0}°F (High: {:.0}°F / Low: {:.0}°F)",
        forecast.temperature_f, forecast.high_f, forecast.low_f
    );
    println!("Humidity: {} / Wind: {}", forecast.humidity, forecast.wind);
    println!();

    for rec in recommend(forecast, duration) {
        println!("  {} {} - {}", rec.icon, rec.name, rec.reason);
    }
    Ok(())
}
