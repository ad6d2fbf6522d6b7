/// Maximum guestbook message length, in characters
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Maximum upload request body (10MB)
/// Phone photos of bank transfer receipts are usually 2-5MB
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the payment proof file
pub const UPLOAD_FILE_FIELD: &str = "comprovativoFile";

/// Cloudinary folder for payment proofs
pub const CLOUDINARY_FOLDER: &str = "comprovativos-casamento";

/// Format every proof is normalized to by the provider
pub const CLOUDINARY_FORMAT: &str = "jpg";

// =============================================================================
// Guest Status Labels
// =============================================================================

pub const STATUS_PENDING: &str = "Pendente";

pub const STATUS_INVITE_OPENED: &str = "Convite Aberto";

/// Prefix of `Confirmado (<party>)`
pub const STATUS_CONFIRMED_PREFIX: &str = "Confirmado";

/// Table label attached to RSVP rows with no matching guest
pub const TABLE_UNASSIGNED: &str = "Sem mesa";

// =============================================================================
// Messages
// =============================================================================

pub const ERR_INCOMPLETE_DATA: &str = "Dados incompletos.";

pub const ERR_GUEST_NOT_FOUND: &str = "Nome não encontrado na lista.";

pub const ERR_DEVICE_CONFLICT: &str = "Este convite já foi aberto noutro dispositivo.";

pub const ERR_BAD_ADMIN_PASSWORD: &str = "Senha de admin incorreta.";

pub const ERR_UNKNOWN_ACTION: &str = "Ação não reconhecida.";

pub const ERR_UNKNOWN_ADMIN_ACTION: &str = "Ação de admin não reconhecida.";

pub const ERR_FILE_MISSING: &str = "Ficheiro não recebido.";

pub const ERR_MESSAGE_TOO_LONG: &str = "A mensagem não pode ter mais de 500 caracteres.";

pub const MSG_RSVP_RECEIVED: &str = "Confirmação recebida!";

pub const MSG_GIFTS_SAVED: &str = "Presentes registados!";

pub const MSG_PROOF_UPLOADED: &str = "Comprovativo enviado!";

pub const MSG_DEVICE_RESET: &str = "Dispositivo removido.";
