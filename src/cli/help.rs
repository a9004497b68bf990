//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.model.is_configured() {
        print_configured_help();
    } else {
        print_first_time_help();
    }
}

/// Print setup guide for users without a scene model.
pub fn print_first_time_help() {
    println!("No scene model configured. Get started with runview:");
    println!();
    println!("1. Initialize configuration:");
    println!("   runview config init");
    println!();
    println!("2. Export CLIP ViT-B/32 to ONNX as two models (vision and text towers),");
    println!("   e.g. with `optimum-cli export onnx --model openai/clip-vit-base-patch32`,");
    println!("   and keep the accompanying tokenizer.json.");
    println!();
    println!("3. Point the [model] section of the config file at the three files, or pass");
    println!("   --vision-model, --text-model and --tokenizer on the command line.");
    println!();
    println!("4. Render a run:");
    println!("   runview run.gpx photos/");
    println!();
    println!("Without a model, photos are still placed but shown as 'Unknown'.");
    println!("No GPX at hand? 'runview mock' writes a synthetic run.");
    println!();
    println!("Run 'runview -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: runview <TRACK> [PHOTOS]... [OPTIONS]");
    println!();
    println!("Example: runview run.gpx photos/ -o run.html --seed 7");
    println!();
    println!("Run 'runview -h' for all options or 'runview scenes' to see the scene catalog.");
}
