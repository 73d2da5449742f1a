//! Prompt → project source files.
//!
//! Template-driven: the prompt only shows up in the project name, page title
//! and headline. Everything else is a fixed React + Vite skeleton wired to the
//! HyperionKit wallet components.

use serde_json::json;

use crate::store::ProjectFile;

/// Produces the source file set for a prompt.
pub trait ProjectGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Vec<ProjectFile>;
}

/// The built-in template generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

impl ProjectGenerator for TemplateGenerator {
    fn generate(&self, prompt: &str) -> Vec<ProjectFile> {
        let slug = project_slug(prompt);
        let title = escape_html(prompt);
        vec![
            ProjectFile::new("package.json", package_json(&slug)),
            ProjectFile::new("vite.config.js", VITE_CONFIG),
            ProjectFile::new(".postcssrc.json", r#"{
  "plugins": {}
}"#),
            ProjectFile::new("index.html", index_html(&title)),
            ProjectFile::new("src/main.jsx", MAIN_JSX),
            ProjectFile::new("src/App.jsx", app_jsx(&title)),
            ProjectFile::new("src/components/HyperionKit.jsx", HYPERIONKIT_JSX),
            ProjectFile::new("src/styles.css", STYLES_CSS),
            ProjectFile::new("README.md", readme(&display_name(prompt), prompt)),
        ]
    }
}

const PROJECT_KEYWORDS: &[&str] = &[
    "create", "build", "make", "generate", "develop", "app", "application", "website", "project",
    "game", "dashboard", "interface", "platform", "tool", "dapp", "defi", "nft", "wallet",
    "crypto", "blockchain",
];

/// Whether the prompt looks like a request to build something.
pub fn is_project_prompt(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    PROJECT_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// npm package name: first three words, lowercase, `[a-z0-9-]` only.
pub fn project_slug(prompt: &str) -> String {
    let slug: String = prompt
        .split(' ')
        .take(3)
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    if slug.is_empty() {
        "hyperionkit-project".to_string()
    } else {
        slug
    }
}

/// Human title: first three words longer than two characters, capitalized.
pub fn display_name(prompt: &str) -> String {
    let cleaned: String = prompt
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let words: Vec<String> = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .take(3)
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "HyperionKit Project".to_string()
    } else {
        words.join(" ")
    }
}

/// Escape text for HTML and JSX text positions.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

fn package_json(slug: &str) -> String {
    let pkg = json!({
        "name": slug,
        "version": "1.0.0",
        "private": true,
        "type": "module",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "vite": "^4.4.5",
            "@vitejs/plugin-react": "^4.0.3"
        },
        "devDependencies": {},
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        }
    });
    serde_json::to_string_pretty(&pkg).unwrap_or_default()
}

fn index_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <div id="root"></div>
    <script type="module" src="./src/main.jsx"></script>
</body>
</html>"#
    )
}

fn app_jsx(title: &str) -> String {
    format!(
        r#"import React, {{ useState }} from 'react'
import {{ ConnectWallet, Swap, Bridge, Staking, Faucet }} from './components/HyperionKit'

function App() {{
  const [counter, setCounter] = useState(0)

  return (
    <div className="app">
      <div className="wallet-section">
        <ConnectWallet />
      </div>
      <div className="container">
        <header className="header">
          <h1>{title}</h1>
          <p>Built with HyperionKit - Web3 Made Simple</p>
        </header>
        <section className="counter">
          <button onClick={{() => setCounter(counter - 1)}}>-</button>
          <span className="counter-value">{{counter}}</span>
          <button onClick={{() => setCounter(counter + 1)}}>+</button>
        </section>
        <section className="components-grid">
          <Swap />
          <Bridge />
          <Staking />
          <Faucet />
        </section>
      </div>
    </div>
  )
}}

export default App"#
    )
}

fn readme(name: &str, description: &str) -> String {
    format!(
        "# {name}

{description}

## About
This project was generated by HyperionKit and ships with wallet connectivity
and the Swap, Bridge, Staking and Faucet components.

## Getting Started
1. `npm install`
2. `npm run dev`
"
    )
}

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()],
  build: {
    outDir: 'dist',
    assetsDir: 'assets'
  },
  server: {
    port: 3000,
    host: true
  },
  esbuild: {
    target: 'es2015'
  }
})"#;

const MAIN_JSX: &str = r#"import React from 'react'
import ReactDOM from 'react-dom/client'
import App from './App.jsx'
import { HyperkitProvider } from './components/HyperionKit.jsx'
import './styles.css'

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <HyperkitProvider>
      <App />
    </HyperkitProvider>
  </React.StrictMode>,
)"#;

const HYPERIONKIT_JSX: &str = r#"import React, { useState, createContext, useContext } from 'react'

const HyperkitContext = createContext()

export function HyperkitProvider({ children }) {
  const [walletAddress, setWalletAddress] = useState('')
  return (
    <HyperkitContext.Provider value={{ walletAddress, setWalletAddress }}>
      {children}
    </HyperkitContext.Provider>
  )
}

export function useWallet() {
  return useContext(HyperkitContext)
}

export function ConnectWallet() {
  const { walletAddress, setWalletAddress } = useWallet()

  const connect = async () => {
    if (walletAddress) {
      setWalletAddress('')
      return
    }
    if (typeof window.ethereum === 'undefined') {
      alert('Please install MetaMask')
      return
    }
    const accounts = await window.ethereum.request({ method: 'eth_requestAccounts' })
    if (accounts.length > 0) setWalletAddress(accounts[0])
  }

  return (
    <button className={walletAddress ? 'connect-wallet-btn connected' : 'connect-wallet-btn'} onClick={connect}>
      {walletAddress ? walletAddress.slice(0, 6) + '...' + walletAddress.slice(-4) : 'Connect Wallet'}
    </button>
  )
}

function Widget({ title, action }) {
  const [amount, setAmount] = useState('')
  return (
    <div className="component-container">
      <h3>{title}</h3>
      <input type="number" placeholder="0.0" value={amount} onChange={e => setAmount(e.target.value)} />
      <button onClick={() => alert(action + ' ' + (amount || '0'))}>{action}</button>
    </div>
  )
}

export function Swap() {
  return <Widget title="Token Swap" action="Swap" />
}

export function Bridge() {
  return <Widget title="Bridge" action="Bridge" />
}

export function Staking() {
  return <Widget title="Staking" action="Stake" />
}

export function Faucet() {
  return <Widget title="Faucet" action="Claim" />
}"#;

const STYLES_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  min-height: 100vh;
  color: #333;
}

.app {
  min-height: 100vh;
  padding: 20px;
}

.wallet-section {
  position: fixed;
  top: 20px;
  right: 20px;
}

.connect-wallet-btn {
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  color: white;
  border: none;
  padding: 12px 24px;
  border-radius: 25px;
  cursor: pointer;
}

.connect-wallet-btn.connected {
  background: linear-gradient(135deg, #10b981 0%, #059669 100%);
}

.container {
  max-width: 1200px;
  margin: 0 auto;
  background: rgba(255, 255, 255, 0.95);
  border-radius: 20px;
  padding: 40px;
}

.header {
  text-align: center;
  margin-bottom: 40px;
}

.components-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
  gap: 20px;
}

.component-container {
  background: white;
  padding: 20px;
  border-radius: 15px;
}"#;
