//! Interactive init/add workflows using cliclack

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::components::{install_component, variant_files, ComponentFetcher, ComponentSource};
use crate::manifest::{ModuleManifest, StyleChoice, MODULE_MANIFEST};
use crate::patch::{eslint, tailwind, Mutation, PatchSeverity};
use crate::project::{
    self, compat, read_package_json, DependencyStatus, NodeStatus, PackageJson, ProjectInfo,
};

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Styling choice, skipping the prompt
    pub style: Option<StyleChoice>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// CLI arguments for the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Local directory to use for component sources instead of the
    /// remote (for development use)
    pub component_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the init workflow: detect the project, choose a style, report
/// supporting dependencies, and write module.json
pub async fn run_init(args: InitArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("calkit init")?;

    let cwd = std::env::current_dir()?;

    // Step 1: project detection
    let spinner = cliclack::spinner();
    spinner.start("Detecting project info...");
    let info = match project::detect(&cwd)? {
        Some(info) => info,
        None => {
            spinner.stop("No package manager found");
            anyhow::bail!("you must install a package manager: npm, pnpm or yarn");
        }
    };
    spinner.stop(format!(
        "Project info detected ({}, {}{})",
        info.package_manager,
        if info.is_tsx { "TypeScript" } else { "JavaScript" },
        if info.is_next { ", Next.js" } else { "" },
    ));

    // Step 2: environment compatibility
    check_environment()?;

    // Step 3: framework compatibility
    let pkg = read_package_json(&cwd)?;
    let framework = compat::resolve_framework(&pkg, info.is_next, info.is_using_app_dir)?;
    cliclack::log::success(format!("Framework: {}", framework.display_name()))?;

    // Step 4: styling choice
    let style = select_style(&args)?;

    // Step 5: supporting dependencies (reported, never installed)
    report_dependencies(&info, &pkg, style)?;

    // Step 6: write module.json, confirming an overwrite
    if !confirm_manifest_overwrite(&cwd, args.yes)? {
        cliclack::outro(format!("{} was left untouched.", MODULE_MANIFEST))?;
        return Ok(());
    }
    let manifest = ModuleManifest::new(&info, style, cli_version);
    let path = manifest.write(&cwd)?;
    cliclack::log::success(format!("Created {}", path.display()))?;

    cliclack::outro("Run `calkit add` to install the component.")?;
    Ok(())
}

/// Run the add workflow: fetch the component files and patch the
/// project's config
pub async fn run_add(args: AddArgs) -> Result<()> {
    cliclack::intro("calkit add")?;

    let cwd = std::env::current_dir()?;
    let manifest = ModuleManifest::load(&cwd)?;
    cliclack::log::info(format!(
        "Installing {} ({}, {})",
        manifest.name,
        if manifest.is_tsx { "TypeScript" } else { "JavaScript" },
        manifest.style_type.display_name(),
    ))?;

    // Step 1: target directory, confirming when it already exists
    let target_dir = manifest.install_dir(&cwd);
    if target_dir.exists() && !args.yes {
        let overwrite: bool = cliclack::confirm("Calendar folder already exists. Overwrite?")
            .initial_value(true)
            .interact()?;
        if !overwrite {
            cliclack::outro("Operation cancelled.")?;
            return Ok(());
        }
    }

    // Step 2: fetch and write the component files
    let fetcher = setup_fetcher(&args)?;
    let variant = manifest.variant_path();
    let files = variant_files(manifest.is_tsx, manifest.style_type);

    let spinner = cliclack::spinner();
    spinner.start("Fetching component files...");
    let written = install_component(&fetcher, &variant, files, &target_dir).await?;
    spinner.stop(format!(
        "Copied {} files to {}",
        written.len(),
        target_dir.display()
    ));

    // Step 3: Tailwind content globs (fatal on failure)
    if manifest.style_type == StyleChoice::Tailwind {
        patch_tailwind(&cwd, &manifest)?;
    }

    // Step 4: ESLint adjustments (best-effort, JavaScript projects only)
    if !manifest.is_tsx {
        patch_eslint(&cwd, &manifest)?;
    }

    cliclack::outro("Your component is now ready. Enjoy using it!")?;
    Ok(())
}

fn check_environment() -> Result<()> {
    match compat::check_node() {
        NodeStatus::Supported { version } => {
            cliclack::log::success(format!("Node.js {}", version))?;
        }
        NodeStatus::TooOld { version } => {
            anyhow::bail!(
                "Node.js version must be {} or higher. Current version: {}",
                compat::MIN_NODE_VERSION,
                version
            );
        }
        NodeStatus::NotFound => {
            cliclack::log::warning("Node.js not found on PATH")?;
        }
    }
    Ok(())
}

fn select_style(args: &InitArgs) -> Result<StyleChoice> {
    if let Some(style) = args.style {
        cliclack::log::info(format!("Styling: {}", style.display_name()))?;
        return Ok(style);
    }
    if args.yes {
        cliclack::log::info("Styling: CSS Modules (--yes mode)")?;
        return Ok(StyleChoice::CssModules);
    }
    let style: StyleChoice = cliclack::select("Which styling solution do you want to use?")
        .item(StyleChoice::CssModules, "CSS Modules", "")
        .item(StyleChoice::Tailwind, "Tailwind", "")
        .interact()?;
    Ok(style)
}

/// Report what the project still needs. Nothing is installed on the
/// user's behalf; the exact commands are printed instead.
fn report_dependencies(info: &ProjectInfo, pkg: &PackageJson, style: StyleChoice) -> Result<()> {
    let manager = info.package_manager;
    let mut steps: Vec<String> = Vec::new();

    if style == StyleChoice::Tailwind {
        if pkg.has_dependency("tailwindcss") {
            cliclack::log::success("Tailwind is already installed.")?;
        } else {
            steps.push(manager.add_command("tailwindcss postcss autoprefixer", true));
        }
    }

    match compat::dayjs_status(pkg) {
        DependencyStatus::Satisfied => {
            cliclack::log::success("Day.js is up to date.")?;
        }
        DependencyStatus::Missing => {
            steps.push(manager.add_command(
                &format!("dayjs@{}", compat::REQUIRED_DAYJS_VERSION),
                false,
            ));
        }
        DependencyStatus::Outdated { installed } => {
            cliclack::log::warning(format!(
                "Day.js {} is older than the required {}.",
                installed,
                compat::REQUIRED_DAYJS_VERSION
            ))?;
            steps.push(manager.add_command(
                &format!("dayjs@{}", compat::REQUIRED_DAYJS_VERSION),
                false,
            ));
        }
    }

    if info.is_tsx && style == StyleChoice::CssModules && !pkg.has_dependency("@types/css-modules")
    {
        steps.push(manager.add_command("@types/css-modules", true));
    }

    if !steps.is_empty() {
        cliclack::log::info("Install the supporting dependencies:")?;
        for step in &steps {
            cliclack::log::info(format!("  {}", step))?;
        }
    }
    Ok(())
}

fn confirm_manifest_overwrite(cwd: &Path, yes: bool) -> Result<bool> {
    let path = ModuleManifest::manifest_path(cwd);
    if !path.exists() || yes {
        return Ok(true);
    }
    let overwrite: bool = cliclack::confirm(format!(
        "{} already exists. Do you want to overwrite it?",
        MODULE_MANIFEST
    ))
    .initial_value(false)
    .interact()?;
    Ok(overwrite)
}

fn setup_fetcher(args: &AddArgs) -> Result<ComponentFetcher> {
    let source = match &args.component_dir {
        Some(dir) => {
            cliclack::log::info(format!("Using local components from {}", dir.display()))?;
            ComponentSource::local(dir.clone())
        }
        None => ComponentSource::from_env()?,
    };
    Ok(ComponentFetcher::new(source, "calkit"))
}

fn patch_tailwind(cwd: &Path, manifest: &ModuleManifest) -> Result<()> {
    let Some(config_path) = project::tailwind_config_path(cwd)? else {
        anyhow::bail!("Tailwind configuration file not found. Please create a tailwind.config.js.");
    };
    let glob = tailwind::calendar_content_glob(manifest.is_src_dir);
    match tailwind::add_content_globs(&config_path, &[glob.to_string()])? {
        Mutation::Patched => {
            cliclack::log::success(format!("Updated {}", config_path.display()))?;
        }
        Mutation::Unchanged => {
            cliclack::log::info("Tailwind configuration already includes the calendar.")?;
        }
        Mutation::Skipped => {}
    }
    Ok(())
}

fn patch_eslint(cwd: &Path, manifest: &ModuleManifest) -> Result<()> {
    let Some(config_path) = project::eslint_config_path(cwd) else {
        cliclack::log::info("No ESLint config found; skipping lint adjustments.")?;
        return Ok(());
    };
    let config = eslint::EslintConfig::new(config_path);
    let mutation = if manifest.is_next {
        eslint::add_next_babel(&config, PatchSeverity::BestEffort)?
    } else {
        eslint::disable_prop_types(&config, PatchSeverity::BestEffort)?
    };
    match mutation {
        Mutation::Patched => {
            cliclack::log::success(format!("Updated {}", config.path.display()))?;
        }
        Mutation::Unchanged => {
            cliclack::log::info("ESLint config already up to date.")?;
        }
        Mutation::Skipped => {}
    }
    Ok(())
}
