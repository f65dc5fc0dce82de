//! Client module - generates the bundled HTML upload page.

/// Render `s` as a JavaScript string literal safe to embed in a `<script>` block.
fn js_string_literal(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace("</", "<\\/")
}

/// Generate an HTML page for uploading, browsing and deleting images.
///
/// # Arguments
///
/// * `base_url` - Base URL the page talks to (e.g., "http://localhost:3000")
/// * `max_file_size` - Per-file limit in bytes, shown to the user
/// * `max_files` - Maximum files per multi-upload
pub fn generate_client_html(base_url: &str, max_file_size: u64, max_files: usize) -> String {
    let base_url = js_string_literal(base_url.trim_end_matches('/'));
    let max_mb = max_file_size as f64 / (1024.0 * 1024.0);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Image Host</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            background: #0f0f0f;
            color: #e6e6e6;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            padding: 32px;
        }}
        h1 {{
            font-size: 20px;
            font-weight: 600;
            margin-bottom: 16px;
        }}
        .panel {{
            background: #1a1a1a;
            border: 1px solid #2a2a2a;
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 24px;
        }}
        .hint {{
            color: #888;
            font-size: 12px;
            margin-top: 8px;
        }}
        button {{
            background: #3b82f6;
            border: none;
            border-radius: 4px;
            color: white;
            cursor: pointer;
            padding: 6px 12px;
            margin-left: 8px;
        }}
        button.danger {{
            background: #ef4444;
        }}
        #status {{
            font-size: 13px;
            margin-top: 8px;
            min-height: 1em;
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
            gap: 16px;
        }}
        .card {{
            background: #1a1a1a;
            border: 1px solid #2a2a2a;
            border-radius: 8px;
            overflow: hidden;
        }}
        .card img {{
            width: 100%;
            height: 140px;
            object-fit: cover;
            display: block;
        }}
        .card .meta {{
            font-size: 11px;
            padding: 8px;
            word-break: break-all;
        }}
    </style>
</head>
<body>
    <h1>Image Host</h1>

    <div class="panel">
        <input type="file" id="files" accept="image/*" multiple>
        <button id="upload">Upload</button>
        <div class="hint">JPEG, PNG, GIF, WebP or BMP. Up to {max_files} files, {max_mb:.1} MB each.</div>
        <div id="status"></div>
    </div>

    <div class="grid" id="gallery"></div>

    <script>
        const BASE_URL = {base_url};
        const statusEl = document.getElementById('status');
        const gallery = document.getElementById('gallery');

        function setStatus(text, ok) {{
            statusEl.textContent = text;
            statusEl.style.color = ok ? '#22c55e' : '#ef4444';
        }}

        async function refresh() {{
            const res = await fetch(BASE_URL + '/images');
            const body = await res.json();
            gallery.innerHTML = '';
            if (!body.success) {{
                setStatus(body.message, false);
                return;
            }}
            for (const image of body.data) {{
                const card = document.createElement('div');
                card.className = 'card';

                const img = document.createElement('img');
                img.src = image.url;
                img.loading = 'lazy';
                card.appendChild(img);

                const meta = document.createElement('div');
                meta.className = 'meta';
                meta.textContent = image.filename + ' (' + (image.size / 1024).toFixed(1) + ' KB)';

                const del = document.createElement('button');
                del.className = 'danger';
                del.textContent = 'Delete';
                del.onclick = async () => {{
                    const r = await fetch(BASE_URL + '/images/' + encodeURIComponent(image.filename), {{ method: 'DELETE' }});
                    const b = await r.json();
                    setStatus(b.message, b.success);
                    refresh();
                }};
                meta.appendChild(del);
                card.appendChild(meta);
                gallery.appendChild(card);
            }}
        }}

        document.getElementById('upload').onclick = async () => {{
            const files = document.getElementById('files').files;
            if (files.length === 0) {{
                setStatus('Please select an image file to upload', false);
                return;
            }}

            const form = new FormData();
            let endpoint;
            if (files.length === 1) {{
                form.append('image', files[0]);
                endpoint = '/upload';
            }} else {{
                for (const f of files) form.append('images', f);
                endpoint = '/upload-multiple';
            }}

            const res = await fetch(BASE_URL + endpoint, {{ method: 'POST', body: form }});
            const body = await res.json();
            setStatus(body.message, body.success);
            refresh();
        }};

        refresh();
    </script>
</body>
</html>"##
    )
}
