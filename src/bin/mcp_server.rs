//! Battle Arena MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the battle engine's presentation surface as tools.
//! Logs go to stderr; stdout carries the protocol.

use std::borrow::Cow;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use battle_arena::mcp_interface::*;
use battle_arena::{
    ArenaConfig, BattleEngine, BattleResult, MemoryStatsStore, PlayerAction, StatsStore,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

/// Path of an optional RON configuration file.
const CONFIG_ENV: &str = "BATTLE_ARENA_CONFIG";

#[derive(Clone)]
pub struct BattleArenaService {
    tool_router: ToolRouter<BattleArenaService>,
    engine: Arc<Mutex<BattleEngine>>,
    stats: Arc<dyn StatsStore>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartSelectionRequest {
    #[schemars(description = "Opponent difficulty: 'easy', 'normal' or 'hard'")]
    pub difficulty: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChooseStarterRequest {
    #[schemars(description = "Species id (e.g. '25') or name (e.g. 'Pikachu') of your starter")]
    pub starter: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UseMoveRequest {
    #[schemars(description = "Name of the move to use")]
    pub move_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UseItemRequest {
    #[schemars(description = "Item to use: 'potion' or 'full' (Full Restore)")]
    pub item: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl BattleArenaService {
    pub fn new(engine: BattleEngine, stats: Arc<dyn StatsStore>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            engine: Arc::new(Mutex::new(engine)),
            stats,
        }
    }

    /// Run `f` against the engine, reporting game errors as tool output.
    fn with_engine<F>(&self, f: F) -> Result<CallToolResult, McpError>
    where
        F: FnOnce(&mut BattleEngine) -> BattleResult<String>,
    {
        let mut engine = self
            .engine
            .lock()
            .map_err(|e| internal_error(format!("Battle engine unavailable: {}", e)))?;
        match f(&mut engine) {
            Ok(text) => text_result(text),
            Err(e) => text_result(format!("Error: {}", e)),
        }
    }

    fn play(&self, action: PlayerAction) -> Result<CallToolResult, McpError> {
        let stats = Arc::clone(&self.stats);
        self.with_engine(move |engine| {
            let report = execute_player_action(engine, action)?;
            let mut text = report.text();
            if let Some(tally) = report.final_tally() {
                stats.save(&tally)?;
                text.push('\n');
                text.push_str(&display_tally(&tally));
                text.push_str("Use 'reset' to pick a new starter.");
            }
            Ok(text)
        })
    }

    #[tool(description = "Pick the opponent difficulty and begin starter selection")]
    async fn start_selection(
        &self,
        Parameters(request): Parameters<StartSelectionRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.with_engine(|engine| {
            let difficulty = parse_difficulty(&request.difficulty)?;
            engine.start_selection(difficulty)?;
            Ok(format!(
                "Difficulty set to {}.\n\n{}",
                difficulty,
                get_available_starters_display(engine)
            ))
        })
    }

    #[tool(description = "List the species available as starters")]
    async fn list_starters(&self) -> Result<CallToolResult, McpError> {
        self.with_engine(|engine| Ok(get_available_starters_display(engine)))
    }

    #[tool(description = "Choose your starter and begin a battle against a random opponent")]
    async fn choose_starter(
        &self,
        Parameters(request): Parameters<ChooseStarterRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.with_engine(|engine| {
            let species_id = resolve_starter(engine, &request.starter)?;
            let snapshot = engine.choose_starter(species_id)?;
            Ok(format!(
                "{}\n\n{}",
                snapshot.log.join("\n"),
                display_battle_status(&snapshot)
            ))
        })
    }

    #[tool(description = "Use one of your creature's moves; the opponent replies immediately")]
    async fn use_move(
        &self,
        Parameters(request): Parameters<UseMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.play(PlayerAction::UseMove {
            move_name: request.move_name,
        })
    }

    #[tool(description = "Use a Potion or Full Restore; the opponent replies immediately")]
    async fn use_item(
        &self,
        Parameters(request): Parameters<UseItemRequest>,
    ) -> Result<CallToolResult, McpError> {
        match parse_item(&request.item) {
            Ok(item) => self.play(PlayerAction::UseItem { item }),
            Err(e) => text_result(format!("Error: {}", e)),
        }
    }

    #[tool(description = "Get the current battle state and status")]
    async fn get_battle_state(&self) -> Result<CallToolResult, McpError> {
        self.with_engine(|engine| Ok(get_battle_status_summary(engine)))
    }

    #[tool(description = "Abandon the current battle and return to starter selection")]
    async fn reset(&self) -> Result<CallToolResult, McpError> {
        self.with_engine(|engine| {
            engine.reset()?;
            Ok(format!(
                "Battle reset. Choose a new starter.\n\n{}",
                get_available_starters_display(engine)
            ))
        })
    }
}

#[tool_handler]
impl ServerHandler for BattleArenaService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => ArenaConfig::load(&PathBuf::from(path))?,
        None => ArenaConfig::default(),
    };
    let stats: Arc<dyn StatsStore> = Arc::new(MemoryStatsStore::default());
    let engine = BattleEngine::from_config(&config, stats.load()?)?;

    tracing::info!(species = engine.starters().len(), "Battle Arena MCP server starting");

    let service = BattleArenaService::new(engine, stats);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!(?quit_reason, "Battle Arena MCP server exiting");
    Ok(())
}
